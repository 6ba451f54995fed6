mod config;

pub use config::{AnalyticsConfig, Config};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory, creating it if needed.
///
/// Resolution order:
/// 1. `SMARTTODO_CONFIG_DIR`, used as-is
/// 2. `~/.config/smarttodo-dev/` when `SMARTTODO_ENV=dev`
/// 3. `~/.config/smarttodo/`
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SMARTTODO_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SMARTTODO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("smarttodo-dev")
            } else {
                base_dir.join("smarttodo")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
