use rusqlite::Connection;

use coordtrace_types::{EngineConfig, NetworkKind};

use crate::{Error, Result};

/// Builds the partial indexes a computation's self-join needs and fills
/// whatever derived columns it depends on, once, inside a transaction,
/// before any partitioned worker touches the store. Runs are idempotent:
/// indexes use `IF NOT EXISTS` and derived columns are only filled where
/// still null.
pub fn prepare(conn: &mut Connection, kind: NetworkKind, config: &EngineConfig) -> Result<()> {
    let tx = conn.transaction().map_err(|e| Error::IndexPreparation(e.into()))?;
    let result = match kind {
        NetworkKind::CoRetweet => prepare_co_retweet(&tx),
        NetworkKind::CoTweet => prepare_co_tweet(&tx),
        NetworkKind::CoReply => prepare_co_reply(&tx),
        NetworkKind::CoSimilarTweet => prepare_co_similar_tweet(&tx),
        NetworkKind::CoLink => prepare_co_link(&tx, config),
    };
    result.map_err(Error::IndexPreparation)?;
    tx.commit().map_err(|e| Error::IndexPreparation(e.into()))?;
    Ok(())
}

fn prepare_co_retweet(conn: &Connection) -> coordtrace_store::Result<()> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_message_repost_ts
            ON message(repost_id, timestamp) WHERE repost_id IS NOT NULL;
         CREATE INDEX IF NOT EXISTS idx_message_user_ts_repost
            ON message(user_id, timestamp, repost_id) WHERE repost_id IS NOT NULL;",
    )?;
    Ok(())
}

fn prepare_co_tweet(conn: &Connection) -> coordtrace_store::Result<()> {
    fill_transformed_messages(conn)?;
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_message_normalized
            ON message(transformed_message_length, transformed_message_hash, timestamp)
            WHERE repost_id IS NULL;",
    )?;
    Ok(())
}

fn prepare_co_reply(conn: &Connection) -> coordtrace_store::Result<()> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_message_reply_ts
            ON message(reply_id, timestamp) WHERE repost_id IS NULL;
         CREATE INDEX IF NOT EXISTS idx_message_user_ts_reply_repost
            ON message(user_id, timestamp, reply_id, repost_id);",
    )?;
    Ok(())
}

fn prepare_co_similar_tweet(conn: &Connection) -> coordtrace_store::Result<()> {
    fill_token_sets(conn)?;
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_message_user_ts_not_repost
            ON message(user_id, timestamp) WHERE repost_id IS NULL;",
    )?;
    Ok(())
}

fn prepare_co_link(conn: &Connection, config: &EngineConfig) -> coordtrace_store::Result<()> {
    let table = link_source_table(config);
    let column = if config.resolved { "resolved_url" } else { "url" };
    conn.execute_batch(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_url_ts ON {table}({column}, timestamp);
         CREATE INDEX IF NOT EXISTS idx_{table}_user_url_ts ON {table}(user_id, {column}, timestamp);",
    ))?;
    Ok(())
}

/// `resolved_message_url` stores the terminal URL under a `resolved_url`
/// column, not `url`; the join predicate in `crate::join` already branches
/// on `config.resolved` to pick the right column name, so the index built
/// here has to match it.
pub fn link_source_table(config: &EngineConfig) -> &'static str {
    if config.resolved {
        "resolved_message_url"
    } else {
        "message_url"
    }
}

fn fill_transformed_messages(conn: &Connection) -> coordtrace_store::Result<()> {
    let mut select = conn.prepare(
        "SELECT message_id, message FROM message
         WHERE repost_id IS NULL AND transformed_message IS NULL",
    )?;
    let rows: Vec<(String, String)> = select
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<_, _>>()?;
    drop(select);

    for (message_id, message) in rows {
        let normalized = coordtrace_text::normalize(&message);
        let length = normalized.chars().count() as i64;
        let hash = coordtrace_text::checksum(&normalized);
        coordtrace_store::Store::fill_transformed_message(conn, &message_id, &normalized, length, hash)?;
    }
    Ok(())
}

fn fill_token_sets(conn: &Connection) -> coordtrace_store::Result<()> {
    let mut select = conn.prepare(
        "SELECT message_id, message FROM message
         WHERE repost_id IS NULL AND token_set IS NULL",
    )?;
    let rows: Vec<(String, String)> = select
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<_, _>>()?;
    drop(select);

    for (message_id, message) in rows {
        let token_set = coordtrace_text::tokenize(&message);
        coordtrace_store::Store::fill_token_set(conn, &message_id, &token_set)?;
    }
    Ok(())
}
