use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};

use coordtrace_store::Store;
use coordtrace_types::{EngineConfig, NetworkKind};

use crate::partition::partition_into_batches;
use crate::{candidates, index, Error, Result};

/// Outcome of one `compute` call: how many candidate users, batches, and
/// worker threads were actually used. Useful for progress reporting and
/// tests; not part of the stored data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeReport {
    pub candidate_users: usize,
    pub batches: usize,
}

/// Computes one coordination network end to end: resets its edge table,
/// prepares indexes, selects candidate users, partitions them, and runs the
/// partitioned self-join across a bounded pool of worker threads.
pub fn compute(db_path: &Path, kind: NetworkKind, config: &EngineConfig) -> Result<ComputeReport> {
    {
        let mut store = Store::open(db_path).map_err(Error::IndexPreparation)?;
        Store::reset_edge_table(store.connection(), kind).map_err(Error::IndexPreparation)?;
        index::prepare(store.connection_mut(), kind, config)?;
    }

    let users = {
        let store = Store::open(db_path).map_err(Error::IndexPreparation)?;
        candidates::candidate_users(store.connection(), kind, config)?
    };
    let candidate_count = users.len();
    let batches = partition_into_batches(users, config.n_workers);
    let batch_count = batches.len();

    tracing::info!(
        network = %kind,
        candidate_users = candidate_count,
        batches = batch_count,
        n_workers = config.n_workers,
        "starting coordination computation"
    );

    run_batches(db_path, kind, config, batches)?;

    Ok(ComputeReport {
        candidate_users: candidate_count,
        batches: batch_count,
    })
}

/// Dispatches each batch to a bounded pool of `n_workers` threads pulling
/// from a shared job queue, mirroring the source system's worker-pool
/// discipline. Collects results as they complete and surfaces the first
/// error; already-running batches are not cancelled.
fn run_batches(
    db_path: &Path,
    kind: NetworkKind,
    config: &EngineConfig,
    batches: Vec<Vec<String>>,
) -> Result<()> {
    if batches.is_empty() {
        return Ok(());
    }

    let total = batches.len();
    let (job_tx, job_rx) = channel::<Vec<String>>();
    for batch in batches {
        job_tx.send(batch).expect("receiver outlives sender");
    }
    drop(job_tx);
    let job_rx = Arc::new(Mutex::new(job_rx));

    let (result_tx, result_rx): (_, Receiver<Result<()>>) = channel();
    let n_threads = config.n_workers.max(1).min(total);

    let handles: Vec<_> = (0..n_threads)
        .map(|i| {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let db_path: PathBuf = db_path.to_path_buf();
            let config = config.clone();
            std::thread::Builder::new()
                .name(format!("coordtrace-worker-{i}"))
                .spawn(move || loop {
                    let batch = {
                        let rx = job_rx.lock().unwrap_or_else(|p| p.into_inner());
                        rx.recv()
                    };
                    let Ok(batch) = batch else { break };
                    let outcome = crate::worker::run_batch(&db_path, kind, &config, &batch);
                    if result_tx.send(outcome).is_err() {
                        break;
                    }
                })
                .expect("failed to spawn coordtrace worker thread")
        })
        .collect();
    drop(result_tx);

    let mut first_error = None;
    let mut completed = 0usize;
    for outcome in result_rx {
        completed += 1;
        if completed % (total / 10).max(1) == 0 {
            tracing::info!(network = %kind, completed, total, "computation progress");
        }
        if let Err(err) = outcome
            && first_error.is_none()
        {
            first_error = Some(err);
        }
    }

    for handle in handles {
        let _ = handle.join();
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
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
            ("m3", "carol", "goodnight moon", 100.0),
        ] {
            let tuple =
                MessageTuple::new(id, user, user, None, None, text, ts, vec![]).unwrap();
            Store::insert_message(conn, &tuple).unwrap();
        }
    }

    #[test]
    fn compute_populates_the_edge_table_and_reports_batch_counts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        seed(&path);

        let config = EngineConfig {
            n_workers: 2,
            ..EngineConfig::default()
        };
        let report = compute(&path, NetworkKind::CoTweet, &config).unwrap();
        assert_eq!(report.candidate_users, 3);
        assert!(report.batches >= 1);

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

    #[test]
    fn recomputing_drops_stale_edges_from_a_prior_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        seed(&path);

        let wide = EngineConfig {
            time_window: 1000.0,
            ..EngineConfig::default()
        };
        compute(&path, NetworkKind::CoTweet, &wide).unwrap();

        let narrow = EngineConfig {
            time_window: 0.0,
            ..EngineConfig::default()
        };
        compute(&path, NetworkKind::CoTweet, &narrow).unwrap();

        let store = Store::open(&path).unwrap();
        let count: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM co_tweet WHERE user_1 = 'alice' AND user_2 = 'bob'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
    }
}
