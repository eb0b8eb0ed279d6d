//! Statusbar configuration persistence
//!
//! Re-exports the shared types from statusbar-types and stores them with confy.

pub use statusbar_types::{
    DEFAULT_REDIRECTED_VARIABLES, DEFAULT_SEPARATOR, DEFAULT_X_OFFSET, OVERLAY_NAMESPACE,
    StatusbarConfig,
};

use crate::error::ConfigError;

const APP_NAME: &str = "statusbar";
const CONFIG_NAME: &str = "config";

/// Extension trait for StatusbarConfig persistence
pub trait StatusbarConfigExt: Sized {
    /// Load the stored configuration, falling back to defaults
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
}

impl StatusbarConfigExt for StatusbarConfig {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default statusbar configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }
}
