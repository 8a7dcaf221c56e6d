use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ReportFormat {
    Plain,
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Plain => write!(f, "plain"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Parser)]
#[command(name = "coordtrace")]
#[command(about = "Detect coordinated behavior across a message corpus", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "coordtrace.db", global = true)]
    pub db: PathBuf,

    #[arg(long, default_value = "plain", global = true)]
    pub format: ReportFormat,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Ingest a JSONL file of raw messages through a provider adapter")]
    Preprocess {
        #[arg(help = "Path to a JSONL file, one raw message object per line")]
        input: PathBuf,

        #[arg(long, help = "Provider adapter to parse with (twitter_v1, twitter_v2)")]
        provider: String,
    },

    #[command(about = "Resolve pending shortened URLs against the current store")]
    ResolveUrls,

    #[command(about = "Compute one coordination network", next_help_heading = "Computation")]
    Compute {
        #[arg(help = "co_retweet | co_tweet | co_reply | co_similar_tweet | co_link")]
        kind: coordtrace_types::NetworkKind,

        #[arg(long)]
        time_window: Option<f64>,

        #[arg(long)]
        min_edge_weight: Option<i64>,

        #[arg(long)]
        similarity_threshold: Option<f64>,

        #[arg(long)]
        min_document_size_similarity: Option<usize>,

        #[arg(long)]
        resolved: bool,

        #[arg(long)]
        n_workers: Option<usize>,
    },

    #[command(about = "Stream a computed network's edges to CSV or GraphML")]
    ExportNetwork {
        #[arg(help = "co_retweet | co_tweet | co_reply | co_similar_tweet | co_link")]
        kind: coordtrace_types::NetworkKind,

        #[arg(long, help = "Write the mirror edge for every (u1, u2) pair")]
        include_symmetric_edges: bool,

        #[arg(long, help = "Keep self-loop edges (user_1 = user_2)")]
        include_self_loops: bool,

        #[arg(long, default_value = "csv")]
        output_format: coordtrace_output::OutputFormat,

        #[arg(long, help = "Output path; defaults to stdout")]
        output: Option<PathBuf>,
    },

    #[command(about = "Stream node annotations for users in a computed network")]
    ExportUserNodes {
        #[arg(help = "co_retweet | co_tweet | co_reply | co_similar_tweet | co_link")]
        kind: coordtrace_types::NetworkKind,

        #[arg(long, help = "Write the mirror edge for every (u1, u2) pair")]
        include_symmetric_edges: bool,

        #[arg(long, help = "Keep self-loop edges (user_1 = user_2)")]
        include_self_loops: bool,

        #[arg(long, help = "Number of recent messages to attach per user")]
        n_messages: Option<usize>,

        #[arg(long, default_value = "csv")]
        output_format: coordtrace_output::OutputFormat,

        #[arg(long, help = "Output path; defaults to stdout")]
        output: Option<PathBuf>,
    },
}
