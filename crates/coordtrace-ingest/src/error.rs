use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A tuple failed validation before insertion; the batch's transaction
    /// is rolled back and the caller decides whether to retry, skip, or
    /// abort the run.
    Malformed { message_id: Option<String>, reason: String },

    /// A store-level violation surfaced mid-batch.
    Store(coordtrace_store::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Malformed { message_id, reason } => match message_id {
                Some(id) => write!(f, "malformed message '{id}': {reason}"),
                None => write!(f, "malformed message: {reason}"),
            },
            Error::Store(err) => write!(f, "store error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Malformed { .. } => None,
            Error::Store(err) => Some(err),
        }
    }
}

impl From<coordtrace_store::Error> for Error {
    fn from(err: coordtrace_store::Error) -> Self {
        Error::Store(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Store(coordtrace_store::Error::from(err))
    }
}
