use std::fmt;

/// Result type for coordtrace-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur opening or operating on a store.
#[derive(Debug)]
pub enum Error {
    /// The on-disk store's `metadata.version` does not match [`crate::SCHEMA_VERSION`].
    /// Fatal: the engine never attempts to migrate a coordtrace store in place.
    IncompatibleStore { found: i64, expected: i64 },

    /// A lower-level SQLite failure.
    Database(rusqlite::Error),

    /// Filesystem failure opening the backing file.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IncompatibleStore { found, expected } => write!(
                f,
                "store schema version {found} is incompatible with expected version {expected}"
            ),
            Error::Database(err) => write!(f, "database error: {err}"),
            Error::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IncompatibleStore { .. } => None,
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
