use std::fmt;

/// Custom error types for FPV parsing
#[derive(Debug)]
pub enum FpvError {
    /// I/O errors
    Io(std::io::Error),
    /// Parse errors with context
    Parse(String),
    /// Invalid calendar date decoded from a packed timestamp
    InvalidTimestamp(String),
    /// End of buffer reached unexpectedly
    UnexpectedEof,
    /// Export format error
    Export(String),
}

impl fmt::Display for FpvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FpvError::Io(err) => write!(f, "I/O error: {}", err),
            FpvError::Parse(msg) => write!(f, "Parse error: {}", msg),
            FpvError::InvalidTimestamp(msg) => write!(f, "Invalid timestamp: {}", msg),
            FpvError::UnexpectedEof => write!(f, "Unexpected end of buffer"),
            FpvError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for FpvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FpvError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FpvError {
    fn from(err: std::io::Error) -> Self {
        FpvError::Io(err)
    }
}

impl From<anyhow::Error> for FpvError {
    fn from(err: anyhow::Error) -> Self {
        FpvError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FpvError>;
