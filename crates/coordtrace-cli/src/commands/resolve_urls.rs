use anyhow::{Context, Result};

use coordtrace_resolver::resolve_pending;
use coordtrace_types::ResolverConfig;

use crate::context::ExecutionContext;

pub fn run(ctx: &ExecutionContext) -> Result<()> {
    let store_cell = ctx.store()?;
    let mut store = store_cell.borrow_mut();

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let report = runtime
        .block_on(resolve_pending(&mut store, &ResolverConfig::cli_default()))
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("url resolution failed")?;

    println!(
        "resolved {} urls ({} ok, {} failed)",
        report.attempted, report.ok, report.failed
    );
    Ok(())
}
