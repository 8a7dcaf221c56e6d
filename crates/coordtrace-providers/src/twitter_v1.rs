use serde_json::Value;

use coordtrace_types::MessageTuple;

use crate::traits::MessageSource;
use crate::{snowflake, Error, Result};

/// Maps a Twitter API v1.1 status object to a [`MessageTuple`].
pub struct TwitterV1;

impl MessageSource for TwitterV1 {
    fn name(&self) -> &'static str {
        "twitter_v1"
    }

    fn parse(&self, raw: &Value) -> Result<MessageTuple> {
        let message_id = pointer_str(raw, "/id_str")?;
        let user_id = pointer_str(raw, "/user/id_str")?;
        let username = pointer_str(raw, "/user/screen_name")?;

        let text = pointer_str(raw, "/full_text")
            .or_else(|_| pointer_str(raw, "/extended_tweet/full_text"))
            .or_else(|_| pointer_str(raw, "/text"))?;

        let repost_id = optional_pointer_str(raw, "/retweeted_status/id_str");
        let reply_id = optional_pointer_str(raw, "/in_reply_to_status_id_str");

        let urls = url_list(raw, "/extended_tweet/entities/urls")
            .or_else(|| url_list(raw, "/entities/urls"))
            .unwrap_or_default();

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

fn optional_pointer_str(raw: &Value, pointer: &str) -> Option<String> {
    raw.pointer(pointer).and_then(Value::as_str).map(str::to_string)
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
