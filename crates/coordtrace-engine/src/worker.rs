use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use rusqlite::params;

use coordtrace_store::Store;
use coordtrace_types::{EngineConfig, NetworkKind};

use crate::join::self_join_sql;
use crate::{Error, Result};

/// Process-wide single-writer discipline: every worker opens its own
/// connection, but only one at a time may append into a shared edge table.
/// SQLite's `busy_timeout` is the second line of defense if this is ever
/// bypassed.
static WRITER: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn writer_lock() -> MutexGuard<'static, ()> {
    WRITER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs one partition's self-join and merges its local result into the
/// shared edge table. Opens a fresh connection so each worker thread gets
/// its own SQLite handle, as required for `co_similar_tweet`'s per-connection
/// `similarity` registration.
pub fn run_batch(
    db_path: &Path,
    kind: NetworkKind,
    config: &EngineConfig,
    batch: &[String],
) -> Result<()> {
    let store = Store::open(db_path).map_err(Error::Worker)?;
    if kind == NetworkKind::CoSimilarTweet {
        store
            .register_similarity(config.min_document_size_similarity)
            .map_err(Error::Worker)?;
    }
    let conn = store.connection();

    conn.execute_batch(&format!(
        "CREATE TEMP TABLE tmp_user_id (user_id TEXT PRIMARY KEY);
         CREATE TEMP TABLE tmp_local_network (
             user_1 TEXT NOT NULL,
             user_2 TEXT NOT NULL,
             weight INTEGER NOT NULL,
             PRIMARY KEY (user_1, user_2)
         );
         DELETE FROM tmp_user_id;
         DELETE FROM tmp_local_network;",
    ))
    .map_err(|e| Error::Worker(e.into()))?;

    {
        let mut insert = conn
            .prepare("INSERT INTO tmp_user_id (user_id) VALUES (?1)")
            .map_err(|e| Error::Worker(e.into()))?;
        for user_id in batch {
            insert
                .execute(params![user_id])
                .map_err(|e| Error::Worker(e.into()))?;
        }
    }

    let sql = self_join_sql(kind, config);
    conn.execute(&sql, params![config.time_window, config.min_edge_weight])
        .map_err(|e| Error::Worker(e.into()))?;

    {
        let _guard = writer_lock();
        conn.execute(
            &format!(
                "INSERT INTO {table} (user_1, user_2, weight)
                 SELECT user_1, user_2, weight FROM tmp_local_network",
                table = kind.table_name()
            ),
            [],
        )
        .map_err(|e| Error::Worker(e.into()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coordtrace_types::MessageTuple;
    use tempfile::tempdir;

    fn seed(path: &Path) {
        let store = Store::open(path).unwrap();
        let conn = store.connection();
        for (id, user, text, ts) in [
            ("m1", "alice", "hello world", 0.0),
            ("m2", "bob", "hello world", 1.0),
        ] {
            let tuple =
                MessageTuple::new(id, user, user, None, None, text, ts, vec![]).unwrap();
            Store::insert_message(conn, &tuple).unwrap();
        }
    }

    #[test]
    fn a_batch_merges_co_tweet_edges_into_the_shared_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        seed(&path);

        let config = EngineConfig::default();
        {
            let mut store = Store::open(&path).unwrap();
            crate::index::prepare(store.connection_mut(), NetworkKind::CoTweet, &config).unwrap();
        }

        run_batch(
            &path,
            NetworkKind::CoTweet,
            &config,
            &["alice".to_string(), "bob".to_string()],
        )
        .unwrap();

        let store = Store::open(&path).unwrap();
        let weight: i64 = store
            .connection()
            .query_row(
                "SELECT weight FROM co_tweet WHERE user_1 = 'alice' AND user_2 = 'bob'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(weight, 1);
    }
}
