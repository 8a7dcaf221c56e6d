use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Transaction};

use coordtrace_types::{Message, MessageTuple, NetworkKind, ResolvedStatus};

use crate::schema;
use crate::Result;

/// Connection wrapper around a single-file coordtrace store.
///
/// Opened in WAL journal mode with `synchronous = NORMAL`: fsync happens on
/// commit, not on every page write. Concurrent readers are unlimited under
/// WAL; concurrent writers are the caller's responsibility to serialize
/// (the engine does this with a process-wide mutex around per-batch
/// appends, `busy_timeout` below is the second line of defense).
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::configure(&conn)?;
        schema::check_version(&conn)?;
        schema::init(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        schema::init(&conn)?;
        Ok(Self { conn })
    }

    fn configure(conn: &Connection) -> Result<()> {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_secs(30))?;
        Ok(())
    }

    /// Binds the `similarity` scalar function on this connection
    /// (`coordtrace-text::similarity`), for use by co_similar_tweet's
    /// self-join. Registration is per-connection: every worker connection
    /// opened by the engine must call this again.
    pub fn register_similarity(&self, min_document_size_similarity: usize) -> Result<()> {
        self.conn.create_scalar_function(
            "similarity",
            2,
            rusqlite::functions::FunctionFlags::SQLITE_UTF8
                | rusqlite::functions::FunctionFlags::SQLITE_DETERMINISTIC,
            move |ctx| {
                let a: String = ctx.get(0)?;
                let b: String = ctx.get(1)?;
                Ok(coordtrace_text::similarity(
                    &a,
                    &b,
                    min_document_size_similarity,
                ))
            },
        )?;
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    pub fn insert_message(conn: &Connection, tuple: &MessageTuple) -> Result<usize> {
        Ok(conn.execute(
            r#"
            INSERT OR IGNORE INTO message
                (message_id, user_id, username, repost_id, reply_id, message, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                tuple.message_id,
                tuple.user_id,
                tuple.username,
                tuple.repost_id,
                tuple.reply_id,
                tuple.message,
                tuple.timestamp,
            ],
        )?)
    }

    pub fn insert_message_url(
        conn: &Connection,
        message_id: &str,
        url: &str,
        timestamp: f64,
        user_id: &str,
    ) -> Result<usize> {
        Ok(conn.execute(
            r#"
            INSERT OR IGNORE INTO message_url (message_id, url, timestamp, user_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![message_id, url, timestamp, user_id],
        )?)
    }

    pub fn insert_resolved_url_stub(conn: &Connection, url: &str) -> Result<usize> {
        Ok(conn.execute(
            "INSERT OR IGNORE INTO resolved_url (url, resolved_url, ssl_verified, resolved_status) VALUES (?1, NULL, NULL, NULL)",
            params![url],
        )?)
    }

    /// URLs whose resolution is still outstanding (seeded by ingest, not
    /// yet visited by a resolve pass).
    pub fn pending_urls(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt =
            conn.prepare("SELECT url FROM resolved_url WHERE resolved_url IS NULL")?;
        let urls = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(urls)
    }

    pub fn update_resolved_url(
        conn: &Connection,
        url: &str,
        resolved_url: &str,
        ssl_verified: Option<bool>,
        status: ResolvedStatus,
    ) -> Result<usize> {
        Ok(conn.execute(
            r#"
            UPDATE resolved_url
            SET resolved_url = ?2, ssl_verified = ?3, resolved_status = ?4
            WHERE url = ?1
            "#,
            params![url, resolved_url, ssl_verified, status.as_str()],
        )?)
    }

    /// Rebuilds `resolved_message_url` as the join of `message_url` and
    /// `resolved_url`, dropping any rows left over from a prior pass.
    pub fn rebuild_resolved_message_url(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM resolved_message_url", [])?;
        conn.execute(
            r#"
            INSERT OR IGNORE INTO resolved_message_url (message_id, resolved_url, timestamp, user_id)
            SELECT mu.message_id, ru.resolved_url, mu.timestamp, mu.user_id
            FROM message_url mu
            JOIN resolved_url ru ON ru.url = mu.url
            WHERE ru.resolved_url IS NOT NULL
            "#,
            [],
        )?;
        Ok(())
    }

    /// Each computation owns its edge table outright: drop and recreate
    /// before a fresh run so stale edges from a previous configuration
    /// never leak through.
    pub fn reset_edge_table(conn: &Connection, kind: NetworkKind) -> Result<()> {
        conn.execute(&format!("DROP TABLE IF EXISTS {}", kind.table_name()), [])?;
        schema::create_edge_table(conn, kind)?;
        Ok(())
    }

    pub fn load_message(conn: &Connection, message_id: &str) -> Result<Option<Message>> {
        let message = conn
            .query_row(
                r#"
                SELECT message_id, user_id, username, repost_id, reply_id, message,
                       transformed_message, transformed_message_length,
                       transformed_message_hash, token_set, timestamp
                FROM message
                WHERE message_id = ?1
                "#,
                params![message_id],
                row_to_message,
            )
            .optional()?;
        Ok(message)
    }

    pub fn fill_transformed_message(
        conn: &Connection,
        message_id: &str,
        transformed_message: &str,
        length: i64,
        hash: i64,
    ) -> Result<()> {
        conn.execute(
            r#"
            UPDATE message
            SET transformed_message = ?2, transformed_message_length = ?3, transformed_message_hash = ?4
            WHERE message_id = ?1
            "#,
            params![message_id, transformed_message, length, hash],
        )?;
        Ok(())
    }

    pub fn fill_token_set(conn: &Connection, message_id: &str, token_set: &str) -> Result<()> {
        conn.execute(
            "UPDATE message SET token_set = ?2 WHERE message_id = ?1",
            params![message_id, token_set],
        )?;
        Ok(())
    }
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        message_id: row.get(0)?,
        user_id: row.get(1)?,
        username: row.get(2)?,
        repost_id: row.get(3)?,
        reply_id: row.get(4)?,
        message: row.get(5)?,
        transformed_message: row.get(6)?,
        transformed_message_length: row.get(7)?,
        transformed_message_hash: row.get(8)?,
        token_set: row.get(9)?,
        timestamp: row.get(10)?,
    })
}
