//! # Configuration Loading
//!
//! Reads an [`EchoConfig`] from a TOML file.
//!
//! ```toml
//! [pipeline]
//! policy_text = "Analyze the effect of a $80 per ton carbon tax."
//! recipient = "analyst@example.org"
//!
//! [lookup]
//! default_tax_rate = 50.0
//!
//! [notifier]
//! preview_chars = 30
//!
//! [store]
//! max_records = 10000
//! ```

use echo_core::{EchoConfig, EchoError};
use std::path::{Path, PathBuf};

/// Maximum configuration file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Resolve and check a config path: must exist, be a regular file, and be
/// no larger than `MAX_CONFIG_FILE_SIZE`.
fn validate_config_path(path: &Path) -> Result<PathBuf, EchoError> {
    let canonical = path.canonicalize().map_err(|e| {
        EchoError::Io(format!("Invalid config path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(EchoError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| EchoError::Io(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(EchoError::Config(format!(
            "Config file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_CONFIG_FILE_SIZE
        )));
    }

    Ok(canonical)
}

/// Parse and validate configuration text.
pub fn parse_config(text: &str) -> Result<EchoConfig, EchoError> {
    let config: EchoConfig =
        toml::from_str(text).map_err(|e| EchoError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EchoConfig, EchoError> {
    let Some(path) = path else {
        return Ok(EchoConfig::default());
    };

    let validated = validate_config_path(path)?;
    let text = std::fs::read_to_string(&validated)
        .map_err(|e| EchoError::Io(format!("Read config: {}", e)))?;

    tracing::debug!("Loaded configuration from {:?}", validated);
    parse_config(&text)
}
