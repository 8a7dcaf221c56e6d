use std::fmt;

/// Result type for coordtrace-types operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while constructing or validating the data model.
#[derive(Debug)]
pub enum Error {
    /// A message tuple failed validation before it could be handed to the ingestor.
    InvalidMessage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidMessage(msg) => write!(f, "invalid message: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
