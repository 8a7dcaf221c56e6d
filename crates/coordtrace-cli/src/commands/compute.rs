use anyhow::{Context, Result};

use coordtrace_types::NetworkKind;

use crate::config::{resolve_engine_config, EngineOverrides, FileConfig};
use crate::context::ExecutionContext;

#[allow(clippy::too_many_arguments)]
pub fn run(
    ctx: &ExecutionContext,
    kind: NetworkKind,
    time_window: Option<f64>,
    min_edge_weight: Option<i64>,
    similarity_threshold: Option<f64>,
    min_document_size_similarity: Option<usize>,
    resolved: bool,
    n_workers: Option<usize>,
) -> Result<()> {
    let file = FileConfig::load().context("failed to load coordtrace.toml")?;
    let config = resolve_engine_config(
        EngineOverrides {
            time_window,
            min_edge_weight,
            similarity_threshold,
            min_document_size_similarity,
            resolved,
            n_workers,
        },
        &file,
    );

    // Ensure the store exists before the engine opens its own independent
    // connections to it, so a fresh `--db` path gets its schema created.
    ctx.store()?;

    let report = coordtrace_engine::compute(ctx.db_path(), kind, &config)
        .with_context(|| format!("failed to compute {kind}"))?;

    println!(
        "computed {kind}: {} candidate users, {} batches",
        report.candidate_users, report.batches
    );
    Ok(())
}
