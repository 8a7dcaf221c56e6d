use std::io::Write;

use coordtrace_types::{NodeAnnotation, TaggedEdge};

use crate::Result;

pub fn write_edges(writer: impl Write, edges: &[TaggedEdge]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["user_1", "user_2", "weight", "edge_type"])?;
    for edge in edges {
        wtr.write_record([
            &edge.user_1,
            &edge.user_2,
            &edge.weight.to_string(),
            &edge.edge_type.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_nodes(writer: impl Write, nodes: &[NodeAnnotation], n_messages: usize) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec!["user_id".to_string(), "latest_username".to_string()];
    header.extend((0..n_messages).map(|i| format!("message_{i}")));
    wtr.write_record(&header)?;

    for node in nodes {
        let mut record = vec![node.user_id.clone(), node.latest_username.clone()];
        record.extend(node.recent_messages.iter().cloned());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coordtrace_types::NetworkKind;

    #[test]
    fn edge_csv_has_one_row_per_edge_plus_header() {
        let edges = vec![TaggedEdge {
            user_1: "alice".to_string(),
            user_2: "bob".to_string(),
            weight: 2,
            edge_type: NetworkKind::CoTweet,
        }];
        let mut buf = Vec::new();
        write_edges(&mut buf, &edges).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("alice,bob,2,co_tweet"));
    }

    #[test]
    fn node_csv_pads_message_columns() {
        let nodes = vec![NodeAnnotation {
            user_id: "u1".to_string(),
            latest_username: "alice".to_string(),
            recent_messages: vec!["hi".to_string(), "".to_string()],
        }];
        let mut buf = Vec::new();
        write_nodes(&mut buf, &nodes, 2).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("user_id,latest_username,message_0,message_1"));
        assert!(text.contains("u1,alice,hi,"));
    }
}
