use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Pass-level failure. Per-URL network failures are never an `Error` — they
/// are recorded as a `ResolvedStatus` on the row and the pass continues.
#[derive(Debug)]
pub enum Error {
    /// The resolver could not read from or write to the store at all.
    Fatal(coordtrace_store::Error),

    /// `reqwest::Client` construction failed (bad TLS config, etc).
    ClientBuild(reqwest::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fatal(err) => write!(f, "resolver store error: {err}"),
            Error::ClientBuild(err) => write!(f, "failed to build http client: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Fatal(err) => Some(err),
            Error::ClientBuild(err) => Some(err),
        }
    }
}

impl From<coordtrace_store::Error> for Error {
    fn from(err: coordtrace_store::Error) -> Self {
        Error::Fatal(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Fatal(coordtrace_store::Error::from(err))
    }
}
