//! Error types for the SoundMexPro bridge
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SmpError
pub type Result<T> = std::result::Result<T, SmpError>;

/// Unified error type for SoundMexPro operations
#[derive(Debug, Error)]
pub enum SmpError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Native Library Errors
    // -------------------------------------------------------------------------
    #[error("Failed to load native library: {0}")]
    LibraryLoad(String),

    #[error("Entry point not found: {0}")]
    SymbolNotFound(String),

    // -------------------------------------------------------------------------
    // Engine Status Errors
    // -------------------------------------------------------------------------
    /// Status 0: the engine is busy, the command may be retried
    #[error("soundmexpro is busy, command \"{command}\" not executed")]
    Busy { command: String },

    /// Negative (or otherwise unexpected) status
    #[error("soundmexpro returned error {code} from command \"{command}\": {message}")]
    Engine {
        command: String,
        code: i32,
        message: String,
    },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SmpError {
    /// Raw engine status code, if this error came from a native call
    pub fn status_code(&self) -> Option<i32> {
        match self {
            SmpError::Busy { .. } => Some(0),
            SmpError::Engine { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True if the engine reported "busy" and the call may be retried
    pub fn is_busy(&self) -> bool {
        matches!(self, SmpError::Busy { .. })
    }
}
