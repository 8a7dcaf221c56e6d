use rusqlite::Connection;

use coordtrace_types::{NetworkKind, OutputConfig, TaggedEdge};

use crate::{Error, Result};

/// Streams the edge table for `kind`, applying the symmetry/self-loop
/// filters and tagging every row with its network kind.
///
/// `loops=false` drops `user_1 = user_2`; `symmetric=false` emits only the
/// `user_2 > user_1` half of each mirrored pair. The two compose into four
/// distinct `WHERE` clauses rather than filtering in Rust after the fact,
/// since the predicate is cheap for SQLite to push into the table scan.
pub fn edges(conn: &Connection, kind: NetworkKind, config: &OutputConfig) -> Result<Vec<TaggedEdge>> {
    if !table_exists(conn, kind.table_name())? {
        return Err(Error::UnknownNetwork(kind));
    }

    let predicate = match (config.loops, config.symmetric) {
        (false, false) => "user_2 > user_1",
        (true, false) => "user_2 >= user_1",
        (false, true) => "user_1 != user_2",
        (true, true) => "1 = 1",
    };

    let sql = format!(
        "SELECT user_1, user_2, weight FROM {table} WHERE {predicate}",
        table = kind.table_name()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TaggedEdge {
                user_1: row.get(0)?,
                user_2: row.get(1)?,
                weight: row.get(2)?,
                edge_type: kind,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
