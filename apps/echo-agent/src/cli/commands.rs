//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use echo_core::{
    EchoConfig, EchoError, Orchestrator, PipelineReport, PolicyRequest, PolicyStore,
    ROOT_AGENT_INSTRUCTION, ROOT_AGENT_NAME, RiskRating, SimplifiedClimateModel, StageKind,
    find_tax_rate, format_percentage,
};

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Build the pipeline request, letting flags override the configuration.
pub fn build_request(
    config: &EchoConfig,
    policy: Option<String>,
    recipient: Option<String>,
) -> Result<PolicyRequest, EchoError> {
    PolicyRequest::new(
        policy.unwrap_or_else(|| config.pipeline.policy_text.clone()),
        recipient.unwrap_or_else(|| config.pipeline.recipient.clone()),
    )
}

/// Run the full pipeline and print the report and the store contents.
pub fn cmd_run(
    config: &EchoConfig,
    json_mode: bool,
    verbose: bool,
    policy: Option<String>,
    recipient: Option<String>,
) -> Result<(), EchoError> {
    let request = build_request(config, policy, recipient)?;
    let mut orchestrator = Orchestrator::new(config);

    tracing::info!("Analyzing policy for {}", request.recipient());
    let report = orchestrator.run(&request)?;

    if json_mode {
        println!("{}", report_json(&report, orchestrator.store()));
        return Ok(());
    }

    println!("*** USER INPUT: {} ***", request.policy_text());
    println!();
    println!("{}", render_report(&report, verbose));
    println!("{}", "=".repeat(80));
    println!("{}", render_store(orchestrator.store()));

    Ok(())
}

/// Human-readable pipeline report.
pub fn render_report(report: &PipelineReport, verbose: bool) -> String {
    let mut out = String::new();

    if verbose {
        out.push_str(&format!("{}: {}\n", ROOT_AGENT_NAME, ROOT_AGENT_INSTRUCTION));
        for stage in StageKind::ALL {
            out.push_str(&format!(
                "{} [{}]\n",
                stage,
                stage.tool_name().unwrap_or("reasoning only")
            ));
            out.push_str(&format!("    model:       {}\n", stage.model()));
            out.push_str(&format!("    instruction: {}\n", stage.instruction()));
        }
        out.push('\n');
    }

    let summary = &report.summary;
    out.push_str("Policy Analysis Summary\n");
    out.push_str("=======================\n");
    out.push_str(&format!("Tax Rate:        ${} per ton\n", report.snapshot.proposed_tax_rate));
    out.push_str(&format!("CO2 Reduction:   {}\n", summary.co2_reduction));
    out.push_str(&format!("Economic Impact: {}\n", summary.economic_impact));
    out.push_str(&format!("Sector Shift:    {}\n", summary.sector_shift));
    out.push_str(&format!("Risk Rating:     {}\n", summary.risk_rating));
    out.push('\n');
    out.push_str(&report.persistence_message);
    out.push('\n');

    let stars = "*".repeat(50);
    out.push('\n');
    out.push_str(&stars);
    out.push('\n');
    out.push_str(&format!("| {}\n", report.notification.email_status));
    out.push_str(&format!("| {}\n", report.notification.alert_status));
    out.push_str(&stars);
    out.push('\n');
    out.push_str(&report.notification.message);
    out.push('\n');

    out
}

/// Listing of every record in the store.
pub fn render_store(store: &PolicyStore) -> String {
    let mut out = format!("Policy Database Contents (Total Records: {}):\n", store.len());
    for (id, summary) in store.iter() {
        out.push_str(&format!("  ID: {}\n", id));
        out.push_str(&format!(
            "  Summary: {} CO2 Reduction, {} Economic Impact\n",
            summary.co2_reduction, summary.economic_impact
        ));
        out.push_str(&format!("{}\n", "-".repeat(20)));
    }
    out
}

/// JSON document for `--json-mode`.
pub fn report_json(report: &PipelineReport, store: &PolicyStore) -> String {
    let output = serde_json::json!({
        "status": "success",
        "report": report,
        "records": store.records(),
    });
    serde_json::to_string_pretty(&output).unwrap_or_default()
}

// =============================================================================
// MODEL COMMAND
// =============================================================================

/// Run only the climate model and print its results.
pub fn cmd_model(json_mode: bool, rate: f64) -> Result<(), EchoError> {
    println!("{}", model_output(json_mode, rate)?);
    Ok(())
}

/// Model output for `rate`, as text or JSON.
///
/// Rates whose results would overflow are rejected.
pub fn model_output(json_mode: bool, rate: f64) -> Result<String, EchoError> {
    if !SimplifiedClimateModel::is_modelable(rate) {
        return Err(EchoError::InvalidRequest(format!(
            "rate {} is outside the model's range",
            rate
        )));
    }

    let result = SimplifiedClimateModel::simulate(rate);
    let risk = RiskRating::from_gdp_impact(result.economic_cost_gdp_impact);

    if json_mode {
        let output = serde_json::json!({
            "rate": rate,
            "simulation_results": result,
            "risk_rating": risk,
        });
        return Ok(serde_json::to_string_pretty(&output).unwrap_or_default());
    }

    let mut out = String::new();
    out.push_str("Climate Model Results\n");
    out.push_str("=====================\n");
    out.push_str(&format!("Rate:            ${} per ton\n", rate));
    out.push_str(&format!(
        "CO2 Reduction:   {}%\n",
        format_percentage(result.predicted_co2_reduction_percentage)
    ));
    out.push_str(&format!(
        "GDP Impact:      {}%\n",
        format_percentage(result.economic_cost_gdp_impact)
    ));
    out.push_str(&format!("Sector Shift:    {}\n", result.energy_sector_shift));
    out.push_str(&format!("Risk Rating:     {}", risk));
    Ok(out)
}

// =============================================================================
// EXTRACT COMMAND
// =============================================================================

/// Run only the rate extractor and print the rate.
pub fn cmd_extract(config: &EchoConfig, json_mode: bool, text: &str) -> Result<(), EchoError> {
    println!("{}", extract_output(config, json_mode, text));
    Ok(())
}

/// Extractor output for `text`, as text or JSON.
pub fn extract_output(config: &EchoConfig, json_mode: bool, text: &str) -> String {
    let found = find_tax_rate(text);
    let rate = found.unwrap_or(config.lookup.default_tax_rate);

    if json_mode {
        let output = serde_json::json!({
            "text": text,
            "proposed_tax_rate": rate,
            "is_default": found.is_none(),
        });
        return serde_json::to_string_pretty(&output).unwrap_or_default();
    }

    match found {
        Some(_) => format!("Proposed tax rate: ${} per ton", rate),
        None => format!("Proposed tax rate: ${} per ton (default)", rate),
    }
}
