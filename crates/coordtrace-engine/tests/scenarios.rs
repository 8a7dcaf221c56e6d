use std::collections::HashSet;
use std::path::Path;

use coordtrace_store::Store;
use coordtrace_types::{EngineConfig, MessageTuple, NetworkKind, ResolvedStatus};

fn message(
    store: &Store,
    id: &str,
    user: &str,
    repost_of: Option<&str>,
    reply_to: Option<&str>,
    text: &str,
    timestamp: f64,
) {
    let tuple = MessageTuple::new(
        id,
        user,
        user,
        repost_of.map(str::to_string),
        reply_to.map(str::to_string),
        text,
        timestamp,
        Vec::new(),
    )
    .unwrap();
    Store::insert_message(store.connection(), &tuple).unwrap();
}

fn edges(path: &Path, kind: NetworkKind) -> HashSet<(String, String, i64)> {
    let store = Store::open(path).unwrap();
    let mut stmt = store
        .connection()
        .prepare(&format!(
            "SELECT user_1, user_2, weight FROM {}",
            kind.table_name()
        ))
        .unwrap();
    stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<rusqlite::Result<HashSet<_>>>()
        .unwrap()
}

#[test]
fn s1_retweet_chain_narrow_and_wide_windows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s1.db");
    {
        let store = Store::open(&path).unwrap();
        message(&store, "m1", "u1", None, None, "root", 0.0);
        message(&store, "m2", "u2", Some("m1"), None, "rt", 0.0);
        message(&store, "m3", "u3", Some("m1"), None, "rt", 1.0);
        message(&store, "m4", "u2", Some("m1"), None, "rt", 60.0);
    }

    let narrow = EngineConfig {
        time_window: 1.0,
        min_edge_weight: 1,
        ..EngineConfig::default()
    };
    coordtrace_engine::compute(&path, NetworkKind::CoRetweet, &narrow).unwrap();
    let found = edges(&path, NetworkKind::CoRetweet);
    assert!(found.contains(&("u2".into(), "u3".into(), 1)));
    assert!(found.contains(&("u3".into(), "u2".into(), 1)));
    // Self-pairs are never excluded from the self-join: u2's own two
    // reposts (m2, m4) always match each other at Δt=0, regardless of
    // time_window, so the self-loop survives computation in both cases.
    assert!(found.contains(&("u2".into(), "u2".into(), 2)));

    let wide = EngineConfig {
        time_window: 60.0,
        min_edge_weight: 1,
        ..EngineConfig::default()
    };
    coordtrace_engine::compute(&path, NetworkKind::CoRetweet, &wide).unwrap();
    let found = edges(&path, NetworkKind::CoRetweet);
    assert!(found.contains(&("u2".into(), "u2".into(), 2)));
}

#[test]
fn s2_co_tweet_normalizes_mentions_and_case() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s2.db");
    {
        let store = Store::open(&path).unwrap();
        message(&store, "m1", "u1", None, None, "Hello @bob", 0.0);
        message(&store, "m2", "u2", None, None, "hello", 0.0);
    }

    let config = EngineConfig {
        time_window: 1.0,
        min_edge_weight: 1,
        ..EngineConfig::default()
    };
    coordtrace_engine::compute(&path, NetworkKind::CoTweet, &config).unwrap();
    let found = edges(&path, NetworkKind::CoTweet);
    assert!(found.contains(&("u1".into(), "u2".into(), 1)));
    assert!(found.contains(&("u2".into(), "u1".into(), 1)));
}

#[test]
fn s3_co_reply_respects_the_temporal_band() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s3.db");
    {
        let store = Store::open(&path).unwrap();
        message(&store, "m1", "u1", None, Some("x"), "a", 0.0);
        message(&store, "m2", "u2", None, Some("x"), "b", 5.0);
        message(&store, "m3", "u3", None, Some("x"), "c", 100.0);
    }

    let config = EngineConfig {
        time_window: 10.0,
        min_edge_weight: 1,
        ..EngineConfig::default()
    };
    coordtrace_engine::compute(&path, NetworkKind::CoReply, &config).unwrap();
    let found = edges(&path, NetworkKind::CoReply);
    assert_eq!(
        found,
        HashSet::from([("u1".to_string(), "u2".to_string(), 1), ("u2".to_string(), "u1".to_string(), 1)])
    );
}

#[test]
fn s4_co_similar_tweet_gates_on_minimum_document_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s4.db");
    {
        let store = Store::open(&path).unwrap();
        message(&store, "m1", "u1", None, None, "a b", 0.0);
        message(&store, "m2", "u2", None, None, "a b", 0.0);
    }
    let gated = EngineConfig {
        time_window: 1.0,
        min_edge_weight: 1,
        similarity_threshold: 0.5,
        min_document_size_similarity: 3,
        ..EngineConfig::default()
    };
    coordtrace_engine::compute(&path, NetworkKind::CoSimilarTweet, &gated).unwrap();
    assert!(edges(&path, NetworkKind::CoSimilarTweet).is_empty());

    let path2 = dir.path().join("s4b.db");
    {
        let store = Store::open(&path2).unwrap();
        message(&store, "m1", "u1", None, None, "a b c d", 0.0);
        message(&store, "m2", "u2", None, None, "a b c e", 0.0);
    }
    let above_gate = EngineConfig {
        time_window: 1.0,
        min_edge_weight: 1,
        similarity_threshold: 0.5,
        min_document_size_similarity: 3,
        ..EngineConfig::default()
    };
    coordtrace_engine::compute(&path2, NetworkKind::CoSimilarTweet, &above_gate).unwrap();
    let found = edges(&path2, NetworkKind::CoSimilarTweet);
    assert!(found.contains(&("u1".into(), "u2".into(), 1)));
}

#[test]
fn s5_co_link_only_matches_on_resolved_urls_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s5.db");
    {
        let store = Store::open(&path).unwrap();
        message(&store, "m1", "u1", None, None, "see short1", 0.0);
        message(&store, "m2", "u2", None, None, "see short2", 0.0);
        Store::insert_message_url(store.connection(), "m1", "short1", 0.0, "u1").unwrap();
        Store::insert_message_url(store.connection(), "m2", "short2", 0.0, "u2").unwrap();
        Store::insert_resolved_url_stub(store.connection(), "short1").unwrap();
        Store::insert_resolved_url_stub(store.connection(), "short2").unwrap();
        Store::update_resolved_url(store.connection(), "short1", "final", Some(true), ResolvedStatus::Ok)
            .unwrap();
        Store::update_resolved_url(store.connection(), "short2", "final", Some(true), ResolvedStatus::Ok)
            .unwrap();
        Store::rebuild_resolved_message_url(store.connection()).unwrap();
    }

    let unresolved = EngineConfig {
        time_window: 1.0,
        min_edge_weight: 1,
        resolved: false,
        ..EngineConfig::default()
    };
    coordtrace_engine::compute(&path, NetworkKind::CoLink, &unresolved).unwrap();
    assert!(edges(&path, NetworkKind::CoLink).is_empty());

    let resolved = EngineConfig {
        time_window: 1.0,
        min_edge_weight: 1,
        resolved: true,
        ..EngineConfig::default()
    };
    coordtrace_engine::compute(&path, NetworkKind::CoLink, &resolved).unwrap();
    let found = edges(&path, NetworkKind::CoLink);
    assert!(found.contains(&("u1".into(), "u2".into(), 1)));
    assert!(found.contains(&("u2".into(), "u1".into(), 1)));
}

#[test]
fn s6_self_loop_survives_computation_and_is_filtered_on_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s6.db");
    {
        let store = Store::open(&path).unwrap();
        message(&store, "m1", "u", None, None, "same", 0.0);
        message(&store, "m2", "u", None, None, "same", 1.0);
    }

    let config = EngineConfig {
        time_window: 10.0,
        min_edge_weight: 1,
        ..EngineConfig::default()
    };
    coordtrace_engine::compute(&path, NetworkKind::CoTweet, &config).unwrap();
    let found = edges(&path, NetworkKind::CoTweet);
    assert!(found.contains(&("u".into(), "u".into(), 2)));
}

#[test]
fn parallel_equivalence_across_worker_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parallel.db");
    {
        let store = Store::open(&path).unwrap();
        for i in 0..20 {
            message(
                &store,
                &format!("m{i}"),
                &format!("u{i}"),
                None,
                None,
                "identical text",
                i as f64,
            );
        }
    }

    let mut results = Vec::new();
    for n_workers in [1, 2, 4] {
        let config = EngineConfig {
            time_window: 100.0,
            min_edge_weight: 1,
            n_workers,
            ..EngineConfig::default()
        };
        coordtrace_engine::compute(&path, NetworkKind::CoTweet, &config).unwrap();
        results.push(edges(&path, NetworkKind::CoTweet));
    }
    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
}
