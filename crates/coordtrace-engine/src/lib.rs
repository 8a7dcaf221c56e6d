mod candidates;
mod compute;
mod error;
mod index;
mod join;
mod partition;
mod worker;

pub use compute::{compute, ComputeReport};
pub use error::{Error, Result};
pub use index::link_source_table;

