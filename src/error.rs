//! tdev error types

/// tdev error types
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    // Device string errors
    #[error("empty device string")]
    EmptyDevice,

    #[error("unknown device type '{0}'")]
    UnknownKind(String),

    #[error("invalid device index in '{input}': {reason}")]
    InvalidIndex { input: String, reason: String },

    // Settings errors
    #[error("invalid thread count {0}: must be at least 1")]
    InvalidThreads(usize),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DeviceError {
    /// Whether this error came from parsing a device string.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            DeviceError::EmptyDevice
                | DeviceError::UnknownKind(_)
                | DeviceError::InvalidIndex { .. }
        )
    }
}

/// Result type alias for tdev operations
pub type Result<T> = std::result::Result<T, DeviceError>;
