use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A required field was absent from the wire payload.
    MissingField(String),

    /// A field was present but could not be interpreted (bad JSON shape,
    /// non-numeric snowflake id, etc).
    Malformed(String),

    /// `MessageTuple::new` rejected the mapped fields.
    InvalidMessage(coordtrace_types::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingField(field) => write!(f, "missing field: {field}"),
            Error::Malformed(msg) => write!(f, "malformed payload: {msg}"),
            Error::InvalidMessage(err) => write!(f, "invalid message: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingField(_) | Error::Malformed(_) => None,
            Error::InvalidMessage(err) => Some(err),
        }
    }
}

impl From<coordtrace_types::Error> for Error {
    fn from(err: coordtrace_types::Error) -> Self {
        Error::InvalidMessage(err)
    }
}
