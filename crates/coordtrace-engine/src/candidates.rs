use rusqlite::Connection;

use coordtrace_types::{EngineConfig, NetworkKind};

use crate::index::link_source_table;
use crate::{Error, Result};

/// Users who could plausibly contribute at least `min_edge_weight` rows to
/// this network kind. Pruned up front so no join work is wasted on users
/// who can never clear the weight threshold.
pub fn candidate_users(
    conn: &Connection,
    kind: NetworkKind,
    config: &EngineConfig,
) -> Result<Vec<String>> {
    let sql = match kind {
        NetworkKind::CoRetweet => {
            "SELECT user_id FROM message WHERE repost_id IS NOT NULL \
             GROUP BY user_id HAVING COUNT(*) >= ?1".to_string()
        }
        NetworkKind::CoTweet => {
            "SELECT user_id FROM message WHERE repost_id IS NULL \
             GROUP BY user_id HAVING COUNT(*) >= ?1".to_string()
        }
        NetworkKind::CoReply => {
            "SELECT user_id FROM message WHERE repost_id IS NULL AND reply_id IS NOT NULL \
             GROUP BY user_id HAVING COUNT(*) >= ?1".to_string()
        }
        NetworkKind::CoSimilarTweet => {
            "SELECT user_id FROM message WHERE repost_id IS NULL AND token_set IS NOT NULL \
             GROUP BY user_id HAVING COUNT(*) >= ?1".to_string()
        }
        NetworkKind::CoLink => {
            format!(
                "SELECT user_id FROM {table} GROUP BY user_id HAVING COUNT(*) >= ?1",
                table = link_source_table(config)
            )
        }
    };

    run_candidate_query(conn, &sql, config.min_edge_weight)
}

fn run_candidate_query(conn: &Connection, sql: &str, min_edge_weight: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(sql).map_err(|e| Error::IndexPreparation(e.into()))?;
    let users = stmt
        .query_map([min_edge_weight], |row| row.get(0))
        .map_err(|e| Error::IndexPreparation(e.into()))?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(|e| Error::IndexPreparation(e.into()))?;
    Ok(users)
}
