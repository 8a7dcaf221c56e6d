mod csv_writer;
mod edges;
mod error;
mod format;
mod graphml;
mod nodes;

pub use edges::edges;
pub use error::{Error, Result};
pub use format::OutputFormat;
pub use nodes::annotate;

use std::io::Write;

use coordtrace_types::{NodeAnnotation, TaggedEdge};

/// Serializes a computed edge set in the requested format.
pub fn write_edges(writer: impl Write, edges: &[TaggedEdge], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => csv_writer::write_edges(writer, edges),
        OutputFormat::GraphMl => graphml::write_edges(writer, edges),
    }
}

/// Serializes node annotations in the requested format. `n_messages` only
/// affects CSV, which needs a fixed column count; GraphML embeds the
/// already-padded message list as one delimited field.
pub fn write_nodes(
    writer: impl Write,
    nodes: &[NodeAnnotation],
    n_messages: usize,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Csv => csv_writer::write_nodes(writer, nodes, n_messages),
        OutputFormat::GraphMl => graphml::write_nodes(writer, nodes),
    }
}
