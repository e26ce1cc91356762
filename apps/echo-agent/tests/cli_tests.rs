//! Integration tests for the ECHO CLI layer.
//!
//! Drives argument parsing, configuration loading and rendering in-process.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use clap::Parser;
use echo_agent::cli::{
    Cli, Commands, build_request, extract_output, model_output, render_report, render_store,
    report_json,
};
use echo_agent::config::{load_config, parse_config};
use echo_core::{EchoConfig, Orchestrator};
use std::io::Write;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Write `contents` to a temporary TOML file.
fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// =============================================================================
// ARGUMENT PARSING TESTS
// =============================================================================

#[test]
fn test_no_subcommand_parses() {
    let cli = Cli::try_parse_from(["echo-agent"]).unwrap();
    assert!(cli.command.is_none());
    assert!(!cli.json_mode);
    assert!(cli.config.is_none());
}

#[test]
fn test_run_with_overrides() {
    let cli = Cli::try_parse_from([
        "echo-agent",
        "--quiet",
        "run",
        "--policy",
        "carbon tax $80",
        "--recipient",
        "me@example.org",
    ])
    .unwrap();

    assert!(cli.quiet);
    match cli.command {
        Some(Commands::Run { policy, recipient }) => {
            assert_eq!(policy.as_deref(), Some("carbon tax $80"));
            assert_eq!(recipient.as_deref(), Some("me@example.org"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_model_accepts_negative_rate() {
    let cli = Cli::try_parse_from(["echo-agent", "model", "--rate", "-12.5"]).unwrap();
    match cli.command {
        Some(Commands::Model { rate }) => assert_eq!(rate, -12.5),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_model_requires_rate() {
    assert!(Cli::try_parse_from(["echo-agent", "model"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["echo-agent", "extract", "--text", "x", "--json-mode"]).unwrap();
    assert!(cli.json_mode);
}

// =============================================================================
// CONFIGURATION TESTS
// =============================================================================

#[test]
fn test_load_config_defaults_without_path() {
    let config = load_config(None).unwrap();
    assert_eq!(config, EchoConfig::default());
}

#[test]
fn test_load_config_from_file() {
    let file = config_file(
        r#"
[pipeline]
recipient = "team@example.org"

[lookup]
default_tax_rate = 40.0

[store]
max_records = 5
"#,
    );

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.pipeline.recipient, "team@example.org");
    assert_eq!(config.lookup.default_tax_rate, 40.0);
    assert_eq!(config.store.max_records, 5);
    // Untouched sections keep their defaults
    assert_eq!(config.notifier.preview_chars, 30);
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert_eq!(err.code(), "io");
}

#[test]
fn test_load_config_directory_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(Some(dir.path())).unwrap_err();
    assert_eq!(err.code(), "io");
}

#[test]
fn test_example_config_parses() {
    let config = parse_config(include_str!("../../../echo.example.toml")).unwrap();
    assert_eq!(config, EchoConfig::default());
}

#[test]
fn test_parse_config_rejects_unknown_key() {
    let err = parse_config("[lookup]\nrate = 3.0\n").unwrap_err();
    assert_eq!(err.code(), "config");
}

#[test]
fn test_parse_config_rejects_bad_range() {
    let err = parse_config("[notifier]\npreview_chars = 0\n").unwrap_err();
    assert_eq!(err.code(), "config");
}

// =============================================================================
// COMMAND TESTS
// =============================================================================

#[test]
fn test_build_request_prefers_flags() {
    let config = EchoConfig::default();

    let request = build_request(&config, Some("carbon tax $10".into()), None).unwrap();
    assert_eq!(request.policy_text(), "carbon tax $10");
    assert_eq!(request.recipient(), config.pipeline.recipient);

    let request = build_request(&config, None, None).unwrap();
    assert_eq!(request.policy_text(), config.pipeline.policy_text);
}

#[test]
fn test_build_request_rejects_empty_policy() {
    let err = build_request(&EchoConfig::default(), Some(String::new()), None).unwrap_err();
    assert_eq!(err.code(), "invalid_request");
}

#[test]
fn test_render_report_and_store() {
    let config = EchoConfig::default();
    let request = build_request(&config, None, None).unwrap();
    let mut orchestrator = Orchestrator::new(&config);
    let report = orchestrator.run(&request).unwrap();

    let text = render_report(&report, true);
    assert!(text.contains("Stage 1: Data Retrieval (Data_Retrieval_Agent) [GoogleSearchTool_Mock]"));
    assert!(text.contains("Stage 3: Synthesis (Synthesis_Agent) [reasoning only]"));
    assert!(text.starts_with("ECHO_Root_Agent: Analyze a climate policy"));
    assert!(text.contains("    model:       gemini-2.5-pro-preview-09-2025\n"));
    assert!(text.contains("    model:       gemini-2.5-flash\n"));
    assert!(text.contains(
        "    instruction: Receive the final structured report. First, use PolicyDBTool"
    ));
    assert!(text.contains("CO2 Reduction:   17.0%"));
    assert!(text.contains("| EMAIL SENT to jane.doe@thinktank.com."));
    assert!(text.contains("NOTIFICATION SUCCESS: Email and in-app alert dispatched."));

    let listing = render_store(orchestrator.store());
    assert!(listing.starts_with("Policy Database Contents (Total Records: 1):"));
    assert!(listing.contains(&format!("  ID: {}", report.policy_id)));
    assert!(listing.contains("17.0% CO2 Reduction, -0.968% GDP change Economic Impact"));
}

#[test]
fn test_report_json_shape() {
    let mut orchestrator = Orchestrator::default();
    let request = build_request(&EchoConfig::default(), None, None).unwrap();
    let report = orchestrator.run(&request).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&report_json(&report, orchestrator.store())).unwrap();

    assert_eq!(json["status"], "success");
    assert_eq!(json["report"]["snapshot"]["proposed_tax_rate"], 120.0);
    assert_eq!(json["report"]["summary"]["risk_rating"], "Moderate");
    assert_eq!(
        json["report"]["simulation"]["energy_sector_shift"],
        "Significant divestment from fossil fuels and strong investment in green hydrogen."
    );
    assert_eq!(json["records"].as_array().unwrap().len(), 1);
    assert_eq!(
        json["records"][0]["id"],
        serde_json::Value::String(report.policy_id.to_string())
    );
}

#[test]
fn test_quiet_report_omits_stage_listing() {
    let mut orchestrator = Orchestrator::default();
    let request = build_request(&EchoConfig::default(), None, None).unwrap();
    let report = orchestrator.run(&request).unwrap();

    let text = render_report(&report, false);
    assert!(text.starts_with("Policy Analysis Summary"));
    assert!(!text.contains("instruction:"));
}

#[test]
fn test_model_output_matches_summary_format() {
    let text = model_output(false, 120.0).unwrap();
    assert!(text.contains("CO2 Reduction:   17.0%"));
    assert!(text.contains("GDP Impact:      -0.968%"));
    assert!(text.contains("Risk Rating:     Moderate"));

    let text = model_output(false, 0.45).unwrap();
    assert!(text.contains("CO2 Reduction:   5.04%"));
}

#[test]
fn test_model_output_rejects_overflowing_rate() {
    let err = model_output(false, 1e300).unwrap_err();
    assert_eq!(err.code(), "invalid_request");
    assert!(model_output(true, f64::NAN).is_err());
}

#[test]
fn test_model_output_json() {
    let json: serde_json::Value =
        serde_json::from_str(&model_output(true, 50.0).unwrap()).unwrap();
    assert_eq!(json["simulation_results"]["predicted_co2_reduction_percentage"], 10.0);
    assert_eq!(json["risk_rating"], "Moderate");
}

#[test]
fn test_extract_output_flags_default_only_when_absent() {
    let config = EchoConfig::default();

    let stated: serde_json::Value =
        serde_json::from_str(&extract_output(&config, true, "carbon tax of $50 per ton")).unwrap();
    assert_eq!(stated["proposed_tax_rate"], 50.0);
    assert_eq!(stated["is_default"], false);

    let absent: serde_json::Value =
        serde_json::from_str(&extract_output(&config, true, "no levy")).unwrap();
    assert_eq!(absent["proposed_tax_rate"], 50.0);
    assert_eq!(absent["is_default"], true);

    assert_eq!(
        extract_output(&config, false, "no levy"),
        "Proposed tax rate: $50 per ton (default)"
    );
    assert_eq!(
        extract_output(&config, false, "carbon tax $75"),
        "Proposed tax rate: $75 per ton"
    );
}
