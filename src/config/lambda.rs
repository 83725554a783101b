//! Settings resolution for the Lambda runtime, where there is no command line.

use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::env;

pub const SETTINGS_PATH_VAR: &str = "PROFILE_FEED_CONFIG";

/// Loads settings from the file named by `PROFILE_FEED_CONFIG`, or defaults
/// when the variable is unset.
pub fn settings_from_env() -> Result<Settings> {
    let settings = match env::var(SETTINGS_PATH_VAR) {
        Ok(path) if !path.trim().is_empty() => {
            tracing::info!("Loading settings from {}", path);
            Settings::from_file(path.trim())?
        }
        _ => Settings::default(),
    };

    settings.validate()?;
    Ok(settings)
}
