//! Error types for statusbar operations

use thiserror::Error;

/// Errors reported by a variable host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    #[error("variable '{name}' is not bound")]
    Unbound { name: String },

    #[error("failed to read variable '{name}': {reason}")]
    Read { name: String, reason: String },
}

/// Errors reported by a surface host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("no surface with handle {0}")]
    UnknownSurface(u64),

    #[error("failed to render surface '{namespace}': {reason}")]
    Render { namespace: String, reason: String },
}

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}
