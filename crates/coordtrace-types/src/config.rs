use serde::{Deserialize, Serialize};

/// Knobs shared by every coordination computation (§4.6, §6 CLI surface).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Half-width, in seconds, of the temporal band used by the self-join.
    pub time_window: f64,
    /// Minimum edge weight; edges below this are pruned.
    pub min_edge_weight: i64,
    /// Jaccard threshold for `co_similar_tweet`.
    pub similarity_threshold: f64,
    /// Minimum token-set size gating the similarity predicate; `0` disables
    /// the gate (plain Jaccard).
    pub min_document_size_similarity: usize,
    /// Whether `co_link` should use `resolved_message_url` instead of the
    /// raw `message_url` table.
    pub resolved: bool,
    /// Number of partition worker threads.
    pub n_workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_window: 60.0,
            min_edge_weight: 1,
            similarity_threshold: 0.5,
            min_document_size_similarity: 0,
            resolved: false,
            n_workers: 4,
        }
    }
}

/// Knobs for the URL resolver (§4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Maximum number of redirects to follow before giving up.
    pub max_redirects: usize,
    /// Bounded-concurrency ceiling for outstanding HTTP requests.
    pub max_concurrency: usize,
    /// Requests issued per rate-limit tick.
    pub requests_per_tick: usize,
    /// Sleep between rate-limit ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// In-flight ceiling before the resolver drains and persists results.
    pub backpressure_limit: usize,
    /// Connect timeout, in seconds.
    pub connect_timeout_secs: u64,
    /// Read timeout, in seconds.
    pub read_timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_redirects: 5,
            max_concurrency: 50,
            requests_per_tick: 25,
            tick_interval_ms: 1000,
            backpressure_limit: 1000,
            connect_timeout_secs: 15,
            read_timeout_secs: 15,
        }
    }
}

impl ResolverConfig {
    /// The CLI's default redirect policy is stricter than the library
    /// default (§4.5, §6): one hop, not five.
    pub fn cli_default() -> Self {
        Self {
            max_redirects: 1,
            ..Self::default()
        }
    }
}

/// Knobs for the output adapter (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub symmetric: bool,
    pub loops: bool,
    pub n_messages: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            symmetric: true,
            loops: false,
            n_messages: 3,
        }
    }
}
