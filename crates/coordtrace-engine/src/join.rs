use coordtrace_types::{EngineConfig, NetworkKind};

use crate::index::link_source_table;

/// Builds the self-join query for one network kind, restricted to the `e1`
/// side's current batch via `tmp_user_id`. Self-pairs
/// (`e1.message_id = e2.message_id`) are deliberately not excluded here —
/// they contribute one self-pair per message, and it's the output adapter's
/// job to decide whether self-loops survive.
///
/// The query inserts directly into `tmp_local_network`, so it has no
/// trailing `;` and no placeholders beyond `?1` (`time_window`) and `?2`
/// (kind-specific threshold, unused by every kind but co_similar_tweet).
pub fn self_join_sql(kind: NetworkKind, config: &EngineConfig) -> String {
    let (source, extra_predicate, repost_filter) = match kind {
        NetworkKind::CoRetweet => (
            "message".to_string(),
            "e1.repost_id = e2.repost_id".to_string(),
            "e1.repost_id IS NOT NULL AND e2.repost_id IS NOT NULL".to_string(),
        ),
        NetworkKind::CoTweet => (
            "message".to_string(),
            "e1.transformed_message_length = e2.transformed_message_length \
             AND e1.transformed_message_hash = e2.transformed_message_hash \
             AND e1.transformed_message = e2.transformed_message"
                .to_string(),
            "e1.repost_id IS NULL AND e2.repost_id IS NULL".to_string(),
        ),
        NetworkKind::CoReply => (
            "message".to_string(),
            "e1.reply_id = e2.reply_id".to_string(),
            "e1.repost_id IS NULL AND e2.repost_id IS NULL \
             AND e1.reply_id IS NOT NULL AND e2.reply_id IS NOT NULL"
                .to_string(),
        ),
        NetworkKind::CoSimilarTweet => (
            "message".to_string(),
            format!("similarity(e1.token_set, e2.token_set) >= {threshold}", threshold = sql_float(config.similarity_threshold)),
            "e1.repost_id IS NULL AND e2.repost_id IS NULL \
             AND e1.token_set IS NOT NULL AND e2.token_set IS NOT NULL"
                .to_string(),
        ),
        NetworkKind::CoLink => {
            let table = link_source_table(config).to_string();
            let url_column = if config.resolved { "resolved_url" } else { "url" };
            (
                table,
                format!("e1.{url_column} = e2.{url_column}"),
                "1 = 1".to_string(),
            )
        }
    };

    format!(
        "INSERT INTO tmp_local_network (user_1, user_2, weight)
         SELECT e1.user_id, e2.user_id, COUNT(DISTINCT e1.message_id)
         FROM {source} e1
         JOIN {source} e2
           ON ABS(e2.timestamp - e1.timestamp) <= ?1
          AND {extra_predicate}
         WHERE {repost_filter}
           AND e1.user_id IN (SELECT user_id FROM tmp_user_id)
         GROUP BY e1.user_id, e2.user_id
         HAVING COUNT(DISTINCT e1.message_id) >= ?2"
    )
}

/// Interpolated directly rather than bound, since `similarity_threshold` is
/// engine configuration, not row data, and SQLite has no prepared-statement
/// slot inside a `create_scalar_function` comparison that composes cleanly
/// with the two positional binds every other kind also uses.
fn sql_float(value: f64) -> String {
    format!("{value:.10}")
}
