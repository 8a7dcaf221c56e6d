use std::io::Write;

use coordtrace_types::{NodeAnnotation, TaggedEdge};

use crate::Result;

/// Hand-rolled GraphML, not a dependency: the format is a thin, well-known
/// XML schema and nothing in the pack pulls in a GraphML crate.
pub fn write_edges(mut writer: impl Write, edges: &[TaggedEdge]) -> Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#
    )?;
    writeln!(writer, r#"  <key id="weight" for="edge" attr.name="weight" attr.type="long"/>"#)?;
    writeln!(writer, r#"  <key id="edge_type" for="edge" attr.name="edge_type" attr.type="string"/>"#)?;
    writeln!(writer, r#"  <graph edgedefault="directed">"#)?;

    let mut node_ids = std::collections::BTreeSet::new();
    for edge in edges {
        node_ids.insert(edge.user_1.clone());
        node_ids.insert(edge.user_2.clone());
    }
    for node_id in &node_ids {
        writeln!(writer, r#"    <node id="{}"/>"#, escape(node_id))?;
    }

    for (i, edge) in edges.iter().enumerate() {
        writeln!(
            writer,
            r#"    <edge id="e{i}" source="{source}" target="{target}">"#,
            source = escape(&edge.user_1),
            target = escape(&edge.user_2),
        )?;
        writeln!(writer, r#"      <data key="weight">{}</data>"#, edge.weight)?;
        writeln!(
            writer,
            r#"      <data key="edge_type">{}</data>"#,
            escape(&edge.edge_type.to_string())
        )?;
        writeln!(writer, "    </edge>")?;
    }

    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</graphml>")?;
    Ok(())
}

pub fn write_nodes(mut writer: impl Write, nodes: &[NodeAnnotation]) -> Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#
    )?;
    writeln!(writer, r#"  <key id="latest_username" for="node" attr.name="latest_username" attr.type="string"/>"#)?;
    writeln!(writer, r#"  <key id="recent_messages" for="node" attr.name="recent_messages" attr.type="string"/>"#)?;
    writeln!(writer, r#"  <graph edgedefault="directed">"#)?;

    for node in nodes {
        writeln!(writer, r#"    <node id="{}">"#, escape(&node.user_id))?;
        writeln!(
            writer,
            r#"      <data key="latest_username">{}</data>"#,
            escape(&node.latest_username)
        )?;
        writeln!(
            writer,
            r#"      <data key="recent_messages">{}</data>"#,
            escape(&node.recent_messages.join("\u{1f}"))
        )?;
        writeln!(writer, "    </node>")?;
    }

    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</graphml>")?;
    Ok(())
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
