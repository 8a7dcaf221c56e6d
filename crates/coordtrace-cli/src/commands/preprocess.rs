use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};

use coordtrace_ingest::ingest_batch;
use coordtrace_providers::{source_for_name, MessageSource};
use coordtrace_types::{Error as TypesError, MessageTuple};

use crate::context::ExecutionContext;

pub fn run(ctx: &ExecutionContext, input: &Path, provider: &str) -> Result<()> {
    let source = source_for_name(provider).context("unknown provider")?;

    let file = std::fs::File::open(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let lines: Vec<String> = std::io::BufReader::new(file)
        .lines()
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("failed to read {}", input.display()))?;

    let tuples: Vec<std::result::Result<MessageTuple, TypesError>> = lines
        .iter()
        .map(|line| parse_line(source.as_ref(), line))
        .collect();

    let store_cell = ctx.store()?;
    let mut store = store_cell.borrow_mut();
    let report = ingest_batch(&mut store, tuples).context("ingestion failed")?;

    println!(
        "ingested {} messages, seeded {} urls for resolution",
        report.messages_inserted, report.urls_inserted
    );
    Ok(())
}

fn parse_line(source: &dyn MessageSource, line: &str) -> std::result::Result<MessageTuple, TypesError> {
    let raw: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| TypesError::InvalidMessage(format!("malformed json line: {e}")))?;
    source
        .parse(&raw)
        .map_err(|e| TypesError::InvalidMessage(e.to_string()))
}
