//! Input adapters mapping external wire formats to `MessageTuple`s ready
//! for the ingestor. The ingestor and CLI only ever see `dyn MessageSource`.

mod error;
mod snowflake;
mod traits;
mod twitter_v1;
mod twitter_v2;

pub use error::{Error, Result};
pub use traits::{source_for_name, MessageSource};
pub use twitter_v1::TwitterV1;
pub use twitter_v2::TwitterV2;
