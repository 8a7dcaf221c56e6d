use coordtrace_store::Store;
use coordtrace_types::MessageTuple;

use crate::{Error, Result};

/// Tallies from one call to [`ingest_batch`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub messages_inserted: usize,
    pub urls_inserted: usize,
}

/// Ingests one batch of message tuples inside a single transaction.
///
/// Each item is itself fallible: adapters commonly build a `MessageTuple`
/// from raw wire data via `MessageTuple::new`, which can reject a malformed
/// row before it ever reaches the store. A construction error here becomes
/// an [`Error::Malformed`] and rolls back everything inserted so far in the
/// batch — per-row partial commits are not a thing coordtrace does.
///
/// URLs attached to a repost message are silently dropped (§4.4); every
/// other URL is mirrored into `resolved_url` with a null `resolved_url`,
/// seeding the resolver's worklist.
pub fn ingest_batch<I>(store: &mut Store, tuples: I) -> Result<IngestReport>
where
    I: IntoIterator<Item = std::result::Result<MessageTuple, coordtrace_types::Error>>,
{
    let tx = store.transaction()?;
    let mut report = IngestReport::default();

    for tuple in tuples {
        let tuple = tuple.map_err(|err| Error::Malformed {
            message_id: None,
            reason: err.to_string(),
        })?;

        let inserted = Store::insert_message(&tx, &tuple)?;
        report.messages_inserted += inserted;

        if tuple.is_repost() {
            continue;
        }

        for url in &tuple.urls {
            Store::insert_message_url(&tx, &tuple.message_id, url, tuple.timestamp, &tuple.user_id)?;
            Store::insert_resolved_url_stub(&tx, url)?;
            report.urls_inserted += 1;
        }
    }

    tx.commit().map_err(coordtrace_store::Error::from)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(id: &str, repost_id: Option<&str>, urls: Vec<&str>) -> std::result::Result<MessageTuple, coordtrace_types::Error> {
        MessageTuple::new(
            id,
            "user-1",
            "alice",
            repost_id.map(str::to_string),
            None,
            "hello world",
            100.0,
            urls.into_iter().map(str::to_string).collect(),
        )
    }

    #[test]
    fn reinserting_the_same_message_id_is_a_no_op() {
        let mut store = Store::open_in_memory().unwrap();
        ingest_batch(&mut store, vec![tuple("m1", None, vec![])]).unwrap();
        let report = ingest_batch(&mut store, vec![tuple("m1", None, vec![])]).unwrap();
        assert_eq!(report.messages_inserted, 0);
    }

    #[test]
    fn repost_urls_are_dropped() {
        let mut store = Store::open_in_memory().unwrap();
        let report = ingest_batch(
            &mut store,
            vec![tuple("m1", Some("original"), vec!["http://a.example"])],
        )
        .unwrap();
        assert_eq!(report.messages_inserted, 1);
        assert_eq!(report.urls_inserted, 0);

        let pending = Store::pending_urls(store.connection()).unwrap();
        assert!(pending.is_empty());
    }

    #[test]
    fn non_repost_urls_seed_the_resolver_worklist() {
        let mut store = Store::open_in_memory().unwrap();
        let report = ingest_batch(
            &mut store,
            vec![tuple("m1", None, vec!["http://a.example", "http://b.example"])],
        )
        .unwrap();
        assert_eq!(report.urls_inserted, 2);

        let pending = Store::pending_urls(store.connection()).unwrap();
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn a_malformed_tuple_rolls_back_the_whole_batch() {
        let mut store = Store::open_in_memory().unwrap();
        let malformed: std::result::Result<MessageTuple, coordtrace_types::Error> =
            MessageTuple::new("", "user-1", "alice", None, None, "hi", 0.0, vec![]);

        let result = ingest_batch(&mut store, vec![tuple("m1", None, vec![]), malformed]);
        assert!(result.is_err());

        let count: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM message", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "transaction must roll back on first malformed row");
    }
}
