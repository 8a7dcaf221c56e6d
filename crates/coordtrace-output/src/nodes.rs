use std::collections::BTreeSet;

use rusqlite::Connection;

use coordtrace_types::{NodeAnnotation, TaggedEdge};

use crate::Result;

/// Builds one annotation per user appearing in at least one surviving edge:
/// their most recently seen username and their `n_messages` most recent
/// message texts, newest first, padded with empty strings if they authored
/// fewer than that.
pub fn annotate(conn: &Connection, edges: &[TaggedEdge], n_messages: usize) -> Result<Vec<NodeAnnotation>> {
    let mut users = BTreeSet::new();
    for edge in edges {
        users.insert(edge.user_1.clone());
        users.insert(edge.user_2.clone());
    }

    let mut annotations = Vec::with_capacity(users.len());
    for user_id in users {
        annotations.push(annotate_one(conn, &user_id, n_messages)?);
    }
    Ok(annotations)
}

fn annotate_one(conn: &Connection, user_id: &str, n_messages: usize) -> Result<NodeAnnotation> {
    let mut stmt = conn.prepare(
        "SELECT username, message FROM message
         WHERE user_id = ?1
         ORDER BY timestamp DESC
         LIMIT ?2",
    )?;
    let rows: Vec<(String, String)> = stmt
        .query_map(rusqlite::params![user_id, n_messages as i64], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .collect::<std::result::Result<_, _>>()?;

    let latest_username = rows
        .first()
        .map(|(username, _)| username.clone())
        .unwrap_or_default();

    let mut recent_messages: Vec<String> = rows.into_iter().map(|(_, message)| message).collect();
    recent_messages.resize(n_messages, String::new());

    Ok(NodeAnnotation {
        user_id: user_id.to_string(),
        latest_username,
        recent_messages,
    })
}
