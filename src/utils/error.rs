//! Error handling for the outer surfaces
//!
//! Rendering itself never fails: every string renders to something. These
//! errors come from reading input and writing output in the CLI and wasm
//! bindings.

use std::fmt;

/// Error raised around a render call
#[derive(Debug, Clone)]
pub enum RenderError {
    /// IO error (reading input, writing output)
    Io { message: String },
    /// Render tree could not be serialized
    Serialization { message: String },
    /// Input rejected before rendering (e.g. malformed options)
    InvalidInput { message: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io { message } => write!(f, "IO error: {}", message),
            RenderError::Serialization { message } => {
                write!(f, "Serialization error: {}", message)
            }
            RenderError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type for the outer surfaces
pub type RenderResult<T> = Result<T, RenderError>;

impl RenderError {
    pub fn invalid(message: impl Into<String>) -> Self {
        RenderError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        RenderError::Serialization {
            message: message.into(),
        }
    }
}
