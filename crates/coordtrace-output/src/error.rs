use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The requested network kind has no corresponding edge table — it was
    /// never computed against this store.
    UnknownNetwork(coordtrace_types::NetworkKind),
    Store(coordtrace_store::Error),
    Csv(csv::Error),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownNetwork(kind) => {
                write!(f, "network '{kind}' has not been computed against this store")
            }
            Error::Store(err) => write!(f, "store error: {err}"),
            Error::Csv(err) => write!(f, "csv error: {err}"),
            Error::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UnknownNetwork(_) => None,
            Error::Store(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::Io(err) => Some(err),
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
        Error::Store(err.into())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
