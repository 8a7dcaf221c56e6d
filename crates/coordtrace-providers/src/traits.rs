use serde_json::Value;

use coordtrace_types::MessageTuple;

use crate::Result;

/// Maps one wire-format record to a [`MessageTuple`] ready for the
/// ingestor. The ingestor and CLI are adapter-agnostic: they hold a
/// `Box<dyn MessageSource>` selected by provider name and never branch on
/// wire format themselves.
pub trait MessageSource: Send + Sync {
    /// Provider name as accepted by `--provider` / config (`"twitter_v1"`,
    /// `"twitter_v2"`).
    fn name(&self) -> &'static str;

    fn parse(&self, raw: &Value) -> Result<MessageTuple>;
}

pub fn source_for_name(name: &str) -> Result<Box<dyn MessageSource>> {
    match name {
        "twitter_v1" | "twitter1.1" | "twitter" => Ok(Box::new(crate::twitter_v1::TwitterV1)),
        "twitter_v2" | "twitter2" => Ok(Box::new(crate::twitter_v2::TwitterV2)),
        other => Err(crate::Error::Malformed(format!("unknown provider: {other}"))),
    }
}
