//! Batch ingestion of message tuples into a coordtrace store: message
//! insertion, repost-aware URL attachment, and resolver worklist seeding.

mod batch;
mod error;

pub use batch::{ingest_batch, IngestReport};
pub use error::{Error, Result};
