// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::graph::WeaveGraph;
use crate::traits::NodeOutputs;
use crate::types::Value;

/// Keeps only outputs that no connection reads, keyed `"node.port"`.
///
/// Consumed outputs are intermediate values and are dropped from the result.
pub fn collect_terminal_outputs(graph: &WeaveGraph, results: &NodeOutputs) -> BTreeMap<String, Value> {
    let mut terminal = BTreeMap::new();
    for (node_id, outputs) in results {
        for (port, value) in outputs {
            if !graph.is_consumed(node_id, port) {
                terminal.insert(format!("{}.{}", node_id, port), value.clone());
            }
        }
    }
    terminal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{PortRef, WeaveConnection, WeaveNode};
    use crate::types::PortValues;
    use serde_json::json;

    #[test]
    fn test_consumed_outputs_are_dropped() {
        let mut graph = WeaveGraph::new("g");
        graph.add_node(WeaveNode::new("a", "p", "A"));
        graph.add_node(WeaveNode::new("b", "p", "B"));
        graph.connect(WeaveConnection::data(PortRef::new("a", "x"), PortRef::new("b", "in")));

        let mut results = NodeOutputs::new();
        results.insert(
            "a".into(),
            PortValues::from([("x".to_string(), json!(1)), ("y".to_string(), json!(2))]),
        );
        results.insert("b".into(), PortValues::from([("x".to_string(), json!(3))]));

        let terminal = collect_terminal_outputs(&graph, &results);
        let keys: Vec<&str> = terminal.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a.y", "b.x"]);
        assert_eq!(terminal["b.x"], json!(3));
    }
}
