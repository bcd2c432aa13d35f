use thiserror::Error;

/// Error types for input sequencing
#[derive(Debug, Error)]
pub enum InputError {
    /// Humanization bounds outside `0 <= min <= max <= 60000`
    #[error("Invalid timing configuration: {0}")]
    Configuration(String),

    /// The OS input primitive reported a failure
    #[error("Platform error: {0}")]
    Platform(String),

    /// The OS refused to place the cursor at the requested position
    #[error("Cursor position ({x}, {y}) rejected by the platform")]
    CursorRejected { x: i32, y: i32 },

    /// A symbolic key name has no entry in the key table
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Error when serializing or deserializing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InputError {
    /// True for errors that leave no OS-visible side effect and may be retried
    /// by the caller with different input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            InputError::CursorRejected { .. } | InputError::UnknownKey(_)
        )
    }
}

/// Result type for input sequencing operations
pub type Result<T> = std::result::Result<T, InputError>;
