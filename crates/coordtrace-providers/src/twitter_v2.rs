use serde_json::Value;

use coordtrace_types::MessageTuple;

use crate::traits::MessageSource;
use crate::{snowflake, Error, Result};

/// Maps a flattened Twitter API v2 tweet (caller has already joined
/// `includes.users` into `author`) to a [`MessageTuple`].
pub struct TwitterV2;

impl MessageSource for TwitterV2 {
    fn name(&self) -> &'static str {
        "twitter_v2"
    }

    fn parse(&self, raw: &Value) -> Result<MessageTuple> {
        let message_id = pointer_str(raw, "/id")?;
        let user_id = pointer_str(raw, "/author_id")?;
        let username = pointer_str(raw, "/author/username")?;
        let text = pointer_str(raw, "/text")?;

        let repost_id = referenced_tweet_id(raw, "retweeted");
        let reply_id = referenced_tweet_id(raw, "replied_to");

        let urls = url_list(raw, "/entities/urls").unwrap_or_default();

        let timestamp = snowflake::timestamp(&message_id)?;

        Ok(MessageTuple::new(
            message_id, user_id, username, repost_id, reply_id, text, timestamp, urls,
        )?)
    }
}

fn pointer_str(raw: &Value, pointer: &str) -> Result<String> {
    raw.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingField(pointer.trim_start_matches('/').replace('/', ".")))
}

fn referenced_tweet_id(raw: &Value, kind: &str) -> Option<String> {
    raw.pointer("/referenced_tweets")?
        .as_array()?
        .iter()
        .find(|entry| entry.get("type").and_then(Value::as_str) == Some(kind))
        .and_then(|entry| entry.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn url_list(raw: &Value, pointer: &str) -> Option<Vec<String>> {
    let entries = raw.pointer(pointer)?.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(|entry| entry.get("expanded_url").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_a_plain_tweet() {
        let raw = json!({
            "id": "1234567890",
            "author_id": "u1",
            "author": { "username": "alice" },
            "text": "hello world",
        });
        let tuple = TwitterV2.parse(&raw).unwrap();
        assert_eq!(tuple.message_id, "1234567890");
        assert_eq!(tuple.user_id, "u1");
        assert_eq!(tuple.username, "alice");
        assert!(tuple.repost_id.is_none());
    }

    #[test]
    fn extracts_retweet_reference_ignoring_other_reference_kinds() {
        let raw = json!({
            "id": "1",
            "author_id": "u1",
            "author": { "username": "alice" },
            "text": "rt",
            "referenced_tweets": [
                { "type": "quoted", "id": "q1" },
                { "type": "retweeted", "id": "original" },
            ],
        });
        let tuple = TwitterV2.parse(&raw).unwrap();
        assert_eq!(tuple.repost_id, Some("original".to_string()));
    }

    #[test]
    fn extracts_reply_reference() {
        let raw = json!({
            "id": "1",
            "author_id": "u1",
            "author": { "username": "alice" },
            "text": "reply",
            "referenced_tweets": [{ "type": "replied_to", "id": "parent" }],
        });
        let tuple = TwitterV2.parse(&raw).unwrap();
        assert_eq!(tuple.reply_id, Some("parent".to_string()));
    }

    #[test]
    fn extracts_expanded_urls() {
        let raw = json!({
            "id": "1",
            "author_id": "u1",
            "author": { "username": "alice" },
            "text": "link",
            "entities": { "urls": [{ "expanded_url": "https://example.com/a" }] },
        });
        let tuple = TwitterV2.parse(&raw).unwrap();
        assert_eq!(tuple.urls, vec!["https://example.com/a".to_string()]);
    }

    #[test]
    fn missing_author_username_is_an_error() {
        let raw = json!({ "id": "1", "author_id": "u1", "text": "x" });
        assert!(TwitterV2.parse(&raw).is_err());
    }
}
