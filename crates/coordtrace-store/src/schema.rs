use rusqlite::Connection;

use coordtrace_types::NetworkKind;

use crate::{Error, Result};

/// Schema version. Increment whenever a table definition changes in a way
/// that is not backward-compatible; coordtrace never migrates a store in
/// place, it just refuses to open one from a different version.
pub const SCHEMA_VERSION: i64 = 1;

pub fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS metadata (
            property TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS message (
            message_id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            username TEXT NOT NULL,
            repost_id TEXT,
            reply_id TEXT,
            message TEXT NOT NULL,
            transformed_message TEXT,
            transformed_message_length INTEGER,
            transformed_message_hash INTEGER,
            token_set TEXT,
            timestamp REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_message_user_ts ON message(user_id, timestamp);

        CREATE TABLE IF NOT EXISTS message_url (
            message_id TEXT NOT NULL,
            url TEXT NOT NULL,
            timestamp REAL NOT NULL,
            user_id TEXT NOT NULL,
            PRIMARY KEY (message_id, url)
        );

        CREATE INDEX IF NOT EXISTS idx_message_url_url_ts ON message_url(url, timestamp);
        CREATE INDEX IF NOT EXISTS idx_message_url_user_url_ts ON message_url(user_id, url, timestamp);

        CREATE TABLE IF NOT EXISTS resolved_url (
            url TEXT PRIMARY KEY,
            resolved_url TEXT,
            ssl_verified INTEGER,
            resolved_status TEXT
        );

        CREATE TABLE IF NOT EXISTS resolved_message_url (
            message_id TEXT NOT NULL,
            resolved_url TEXT NOT NULL,
            timestamp REAL NOT NULL,
            user_id TEXT NOT NULL,
            PRIMARY KEY (message_id, resolved_url)
        );

        CREATE INDEX IF NOT EXISTS idx_resolved_message_url_url_ts ON resolved_message_url(resolved_url, timestamp);
        CREATE INDEX IF NOT EXISTS idx_resolved_message_url_user_url_ts ON resolved_message_url(user_id, resolved_url, timestamp);
        "#,
    )?;

    for kind in NetworkKind::all() {
        create_edge_table(conn, kind)?;
    }

    seed_version(conn)?;
    Ok(())
}

pub fn create_edge_table(conn: &Connection, kind: NetworkKind) -> Result<()> {
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                user_1 TEXT NOT NULL,
                user_2 TEXT NOT NULL,
                weight INTEGER NOT NULL,
                PRIMARY KEY (user_1, user_2)
            )",
            table = kind.table_name()
        ),
        [],
    )?;
    Ok(())
}

fn seed_version(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO metadata (property, value) VALUES ('version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}

/// Reads the store's recorded schema version, if the `metadata` table
/// already exists with a `version` row (a brand new store has neither yet).
pub fn stored_version(conn: &Connection) -> Result<Option<i64>> {
    let table_exists: bool = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'metadata'",
        [],
        |row| row.get::<_, i64>(0).map(|c| c > 0),
    )?;
    if !table_exists {
        return Ok(None);
    }

    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE property = 'version'",
            [],
            |row| row.get(0),
        )
        .ok();

    Ok(value.and_then(|v| v.parse::<i64>().ok()))
}

pub fn check_version(conn: &Connection) -> Result<()> {
    if let Some(found) = stored_version(conn)? {
        if found != SCHEMA_VERSION {
            return Err(Error::IncompatibleStore {
                found,
                expected: SCHEMA_VERSION,
            });
        }
    }
    Ok(())
}
