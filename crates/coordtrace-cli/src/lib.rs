pub mod args;
pub mod commands;
mod config;
mod context;
mod logging;

use anyhow::Result;

pub use args::Cli;
use args::Commands;
use context::ExecutionContext;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let ctx = ExecutionContext::new(cli.db.clone());

    match cli.command {
        Commands::Preprocess { input, provider } => {
            commands::preprocess::run(&ctx, &input, &provider)
        }
        Commands::ResolveUrls => commands::resolve_urls::run(&ctx),
        Commands::Compute {
            kind,
            time_window,
            min_edge_weight,
            similarity_threshold,
            min_document_size_similarity,
            resolved,
            n_workers,
        } => commands::compute::run(
            &ctx,
            kind,
            time_window,
            min_edge_weight,
            similarity_threshold,
            min_document_size_similarity,
            resolved,
            n_workers,
        ),
        Commands::ExportNetwork {
            kind,
            include_symmetric_edges,
            include_self_loops,
            output_format,
            output,
        } => commands::export_network::run(
            &ctx,
            kind,
            include_symmetric_edges,
            include_self_loops,
            output_format,
            output,
        ),
        Commands::ExportUserNodes {
            kind,
            include_symmetric_edges,
            include_self_loops,
            n_messages,
            output_format,
            output,
        } => commands::export_user_nodes::run(
            &ctx,
            kind,
            include_symmetric_edges,
            include_self_loops,
            n_messages,
            output_format,
            output,
        ),
    }
}
