use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Building the indexes/derived columns a computation needs failed;
    /// fatal to the whole computation.
    IndexPreparation(coordtrace_store::Error),

    /// A self-join query referenced the `similarity` predicate on a
    /// connection that never registered it. The engine always registers it
    /// itself before running a co_similar_tweet batch, so this should be
    /// unreachable in practice — modeled because a worker that forgot to
    /// bind the UDF hits exactly this in the source system.
    PredicateMissing,

    /// A worker's self-join-and-insert failed. Surfaced at the first
    /// result inspection; the engine stops submitting new batches but does
    /// not wait for already-running batches.
    Worker(coordtrace_store::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexPreparation(err) => write!(f, "index preparation failed: {err}"),
            Error::PredicateMissing => write!(f, "similarity predicate not registered on connection"),
            Error::Worker(err) => write!(f, "worker failed: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IndexPreparation(err) => Some(err),
            Error::PredicateMissing => None,
            Error::Worker(err) => Some(err),
        }
    }
}
