use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A message handed to the ingestor by an adapter (CLI file reader, provider,
/// or a caller driving the library directly).
///
/// Empty `repost_id`/`reply_id` strings are not valid here — adapters must
/// normalize those to `None` before constructing a tuple; `MessageTuple::new`
/// enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTuple {
    pub message_id: String,
    pub user_id: String,
    pub username: String,
    pub repost_id: Option<String>,
    pub reply_id: Option<String>,
    pub message: String,
    pub timestamp: f64,
    pub urls: Vec<String>,
}

impl MessageTuple {
    pub fn new(
        message_id: impl Into<String>,
        user_id: impl Into<String>,
        username: impl Into<String>,
        repost_id: Option<String>,
        reply_id: Option<String>,
        message: impl Into<String>,
        timestamp: f64,
        urls: Vec<String>,
    ) -> Result<Self> {
        let message_id = message_id.into();
        let user_id = user_id.into();

        if message_id.is_empty() {
            return Err(Error::InvalidMessage("message_id must not be empty".into()));
        }
        if user_id.is_empty() {
            return Err(Error::InvalidMessage("user_id must not be empty".into()));
        }
        if !timestamp.is_finite() {
            return Err(Error::InvalidMessage(format!(
                "timestamp must be finite, got {timestamp}"
            )));
        }

        Ok(Self {
            message_id,
            user_id,
            username: username.into(),
            repost_id: normalize_optional(repost_id),
            reply_id: normalize_optional(reply_id),
            message: message.into(),
            timestamp,
            urls,
        })
    }

    pub fn is_repost(&self) -> bool {
        self.repost_id.is_some()
    }
}

/// Collapse an empty-string optional field (common in loosely-typed source
/// payloads) down to `None`, per the ingestion-tuple invariant in §6.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// A message row as stored in the `message` table, including the derived
/// columns that are filled lazily by the engine's preparation phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    pub user_id: String,
    pub username: String,
    pub repost_id: Option<String>,
    pub reply_id: Option<String>,
    pub message: String,
    pub transformed_message: Option<String>,
    pub transformed_message_length: Option<i64>,
    pub transformed_message_hash: Option<i64>,
    pub token_set: Option<String>,
    pub timestamp: f64,
}

impl Message {
    pub fn is_repost(&self) -> bool {
        self.repost_id.is_some()
    }
}

/// A `(message_id, url)` attachment row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageUrl {
    pub message_id: String,
    pub url: String,
    pub timestamp: f64,
    pub user_id: String,
}

/// Resolution status for a short URL, matching the resolver's error
/// classification (§4.5/§7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedStatus {
    Ok,
    Timeout,
    TooManyRedirects,
    SslError,
    ConnectionError,
    OtherError,
}

impl ResolvedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedStatus::Ok => "ok",
            ResolvedStatus::Timeout => "timeout",
            ResolvedStatus::TooManyRedirects => "too_many_redirects",
            ResolvedStatus::SslError => "ssl_error",
            ResolvedStatus::ConnectionError => "connection_error",
            ResolvedStatus::OtherError => "other_error",
        }
    }
}

impl std::str::FromStr for ResolvedStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ok" => Ok(ResolvedStatus::Ok),
            "timeout" => Ok(ResolvedStatus::Timeout),
            "too_many_redirects" => Ok(ResolvedStatus::TooManyRedirects),
            "ssl_error" => Ok(ResolvedStatus::SslError),
            "connection_error" => Ok(ResolvedStatus::ConnectionError),
            "other_error" => Ok(ResolvedStatus::OtherError),
            other => Err(Error::InvalidMessage(format!(
                "unknown resolved_status: {other}"
            ))),
        }
    }
}

/// A resolved-URL row: the terminal URL a short URL redirected to, or the
/// original URL itself if resolution failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedUrl {
    pub url: String,
    pub resolved_url: Option<String>,
    pub ssl_verified: Option<bool>,
    pub resolved_status: Option<ResolvedStatus>,
}
