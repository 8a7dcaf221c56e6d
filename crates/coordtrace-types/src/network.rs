use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One of the five coordination networks the engine can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkKind {
    CoRetweet,
    CoTweet,
    CoReply,
    CoSimilarTweet,
    CoLink,
}

impl NetworkKind {
    pub fn all() -> [NetworkKind; 5] {
        [
            NetworkKind::CoRetweet,
            NetworkKind::CoTweet,
            NetworkKind::CoReply,
            NetworkKind::CoSimilarTweet,
            NetworkKind::CoLink,
        ]
    }

    /// Name of the backing SQLite table for this network's edges.
    pub fn table_name(&self) -> &'static str {
        match self {
            NetworkKind::CoRetweet => "co_retweet",
            NetworkKind::CoTweet => "co_tweet",
            NetworkKind::CoReply => "co_reply",
            NetworkKind::CoSimilarTweet => "co_similar_tweet",
            NetworkKind::CoLink => "co_link",
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

impl FromStr for NetworkKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "co_retweet" | "co-retweet" => Ok(NetworkKind::CoRetweet),
            "co_tweet" | "co-tweet" => Ok(NetworkKind::CoTweet),
            "co_reply" | "co-reply" => Ok(NetworkKind::CoReply),
            "co_similar_tweet" | "co-similar-tweet" => Ok(NetworkKind::CoSimilarTweet),
            "co_link" | "co-link" => Ok(NetworkKind::CoLink),
            other => Err(Error::InvalidMessage(format!(
                "unknown network kind: {other}"
            ))),
        }
    }
}

/// One row of a computed edge table: `(user_1, user_2, weight)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub user_1: String,
    pub user_2: String,
    pub weight: i64,
}

/// An edge row as emitted by the output adapter, tagged with the network
/// kind it came from (§4.7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedEdge {
    pub user_1: String,
    pub user_2: String,
    pub weight: i64,
    pub edge_type: NetworkKind,
}

/// A node annotation: the most recent `n_messages` texts authored by a user
/// that appears in at least one surviving edge, newest first, padded with
/// empty strings to exactly `n_messages` entries (§4.7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAnnotation {
    pub user_id: String,
    pub latest_username: String,
    pub recent_messages: Vec<String>,
}
