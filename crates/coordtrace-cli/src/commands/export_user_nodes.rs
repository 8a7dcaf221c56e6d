use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use coordtrace_output::OutputFormat;
use coordtrace_types::{NetworkKind, OutputConfig};

use crate::context::ExecutionContext;

#[allow(clippy::too_many_arguments)]
pub fn run(
    ctx: &ExecutionContext,
    kind: NetworkKind,
    include_symmetric_edges: bool,
    include_self_loops: bool,
    n_messages: Option<usize>,
    output_format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let store_cell = ctx.store()?;
    let store = store_cell.borrow();

    let default_config = OutputConfig::default();
    let n_messages = n_messages.unwrap_or(default_config.n_messages);
    let config = OutputConfig {
        symmetric: include_symmetric_edges,
        loops: include_self_loops,
        n_messages,
    };

    let edges = coordtrace_output::edges(store.connection(), kind, &config)
        .with_context(|| format!("failed to read {kind} edges; has it been computed?"))?;
    let nodes = coordtrace_output::annotate(store.connection(), &edges, n_messages)
        .context("failed to annotate nodes")?;

    write_to(output.as_deref(), |w| {
        coordtrace_output::write_nodes(w, &nodes, n_messages, output_format).map_err(Into::into)
    })
}

fn write_to(path: Option<&Path>, body: impl FnOnce(&mut dyn Write) -> Result<()>) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            body(&mut file)
        }
        None => {
            let mut stdout = io::stdout().lock();
            body(&mut stdout)
        }
    }
}
