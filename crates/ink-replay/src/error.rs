//! Replay errors

use ink_core::{ConfigError, ExportError};

/// Errors surfaced by the replay commands
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Script error: {0}")]
    Script(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
