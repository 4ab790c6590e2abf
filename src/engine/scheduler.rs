// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution ordering for weave graphs.
//!
//! Ordering is a depth-first walk over the forward adjacency (producer to
//! consumers) with three-colour marking:
//!
//! - **unmarked**: not yet reached
//! - **in progress**: on the current DFS path
//! - **done**: it and everything downstream of it is placed
//!
//! A node is prepended to the order once all of its consumers are done, so
//! every producer lands before every consumer. Reaching an in-progress node
//! again means the path has looped back on itself, which is reported as
//! [`ExecutionError::CircularDependency`] with the looping path.
//!
//! The walk starts from each entry point in listed order, then from every
//! remaining node in declaration order so disconnected parts are scheduled too.

use std::collections::{HashMap, VecDeque};

use crate::errors::ExecutionError;
use crate::graph::{DependencyGraph, WeaveGraph};
use crate::observability::messages::validation::CircularDependencyDetected;
use crate::observability::messages::StructuredLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

struct Walk<'g> {
    dependents: &'g DependencyGraph,
    marks: HashMap<String, Mark>,
    path: Vec<String>,
    order: VecDeque<String>,
}

impl Walk<'_> {
    fn visit(&mut self, node: &str) -> Result<(), ExecutionError> {
        match self.marks.get(node) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => {
                let start = self.path.iter().position(|n| n == node).unwrap_or(0);
                let mut cycle = self.path[start..].to_vec();
                cycle.push(node.to_string());
                return Err(ExecutionError::CircularDependency {
                    node: node.to_string(),
                    cycle,
                });
            }
            None => {}
        }

        self.marks.insert(node.to_string(), Mark::InProgress);
        self.path.push(node.to_string());

        if let Some(consumers) = self.dependents.get_dependents(node) {
            for consumer in consumers {
                self.visit(consumer)?;
            }
        }

        self.path.pop();
        self.marks.insert(node.to_string(), Mark::Done);
        self.order.push_front(node.to_string());
        Ok(())
    }
}

/// Topological execution order for `graph`.
pub fn execution_order(graph: &WeaveGraph) -> Result<Vec<String>, ExecutionError> {
    let dependents = graph.dependency_graph();
    let mut walk = Walk {
        dependents: &dependents,
        marks: HashMap::new(),
        path: Vec::new(),
        order: VecDeque::new(),
    };

    let entry_points = graph.entry_points();
    let seeds = entry_points.iter().chain(graph.nodes.keys());
    for node in seeds {
        if let Err(err) = walk.visit(node) {
            if let ExecutionError::CircularDependency { node, .. } = &err {
                CircularDependencyDetected {
                    graph: &graph.metadata.name,
                    node_id: node,
                }
                .log();
            }
            return Err(err);
        }
    }

    Ok(walk.order.into())
}

/// Groups an execution order into tiers.
///
/// A node's tier is one past the highest tier among the nodes feeding it, or
/// zero when nothing feeds it. Nodes in one tier never feed each other, and
/// each tier keeps the relative order of `order`.
pub fn compute_levels(graph: &WeaveGraph, order: &[String]) -> Vec<Vec<String>> {
    let mut tiers: HashMap<&str, usize> = HashMap::new();
    let mut levels: Vec<Vec<String>> = Vec::new();

    for id in order {
        let tier = graph
            .incoming(id)
            .filter_map(|c| tiers.get(c.from.node.as_str()))
            .map(|t| t + 1)
            .max()
            .unwrap_or(0);
        tiers.insert(id.as_str(), tier);

        if levels.len() <= tier {
            levels.resize_with(tier + 1, Vec::new);
        }
        levels[tier].push(id.clone());
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{PortRef, WeaveConnection, WeaveNode};

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> WeaveGraph {
        let mut graph = WeaveGraph::new("test");
        for id in nodes {
            graph.add_node(WeaveNode::new(*id, "basic", "Start"));
        }
        for (from, to) in edges {
            graph.connect(WeaveConnection::data(
                PortRef::new(*from, "out"),
                PortRef::new(*to, "in"),
            ));
        }
        graph
    }

    fn position(order: &[String], id: &str) -> usize {
        order.iter().position(|n| n == id).unwrap()
    }

    fn assert_respects_connections(graph: &WeaveGraph, order: &[String]) {
        assert_eq!(order.len(), graph.nodes.len());
        for c in &graph.connections {
            assert!(
                position(order, &c.from.node) < position(order, &c.to.node),
                "{} scheduled after {}",
                c.from.node,
                c.to.node
            );
        }
    }

    #[test]
    fn test_linear_chain() {
        let g = graph(&["c", "b", "a"], &[("a", "b"), ("b", "c")]);
        assert_eq!(execution_order(&g).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_diamond_respects_every_connection() {
        let g = graph(
            &["start", "left", "right", "join"],
            &[("start", "left"), ("start", "right"), ("left", "join"), ("right", "join")],
        );
        let order = execution_order(&g).unwrap();
        assert_respects_connections(&g, &order);
        assert_eq!(order.first().unwrap(), "start");
        assert_eq!(order.last().unwrap(), "join");
    }

    #[test]
    fn test_disconnected_components_are_all_scheduled() {
        let mut g = graph(&["a", "b", "x", "y", "lonely"], &[("a", "b"), ("x", "y")]);
        g.metadata.entry_points = vec!["a".into()];
        let order = execution_order(&g).unwrap();
        assert_respects_connections(&g, &order);
        assert!(order.contains(&"lonely".to_string()));
    }

    #[test]
    fn test_multiple_connections_between_same_nodes() {
        let mut g = graph(&["a", "b"], &[("a", "b")]);
        g.connect(WeaveConnection::control(PortRef::new("a", "done"), PortRef::new("b", "trigger")));
        assert_eq!(execution_order(&g).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_cycle_names_a_node_on_the_cycle() {
        let mut g = graph(&["start", "a", "b"], &[("start", "a"), ("a", "b"), ("b", "a")]);
        g.metadata.entry_points = vec!["start".into()];
        let err = execution_order(&g).unwrap_err();
        match err {
            ExecutionError::CircularDependency { node, cycle } => {
                assert_eq!(node, "a");
                assert_eq!(cycle, vec!["a", "b", "a"]);
            }
            other => panic!("expected circular dependency, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_without_entry_points_is_still_found() {
        // Every node has an incoming connection, so there are no default entry points.
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        assert!(g.entry_points().0.is_empty());
        let err = execution_order(&g).unwrap_err();
        assert!(err.to_string().contains("Circular dependency"));
    }

    #[test]
    fn test_self_loop() {
        let g = graph(&["a"], &[("a", "a")]);
        assert!(matches!(
            execution_order(&g),
            Err(ExecutionError::CircularDependency { node, .. }) if node == "a"
        ));
    }

    #[test]
    fn test_levels_group_independent_nodes() {
        let g = graph(
            &["start", "ts", "even", "fmt"],
            &[("start", "ts"), ("ts", "even"), ("ts", "fmt"), ("start", "fmt")],
        );
        let order = execution_order(&g).unwrap();
        let levels = compute_levels(&g, &order);

        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0], vec!["start"]);
        assert_eq!(levels[1], vec!["ts"]);
        let mut last = levels[2].clone();
        last.sort();
        assert_eq!(last, vec!["even", "fmt"]);
    }

    #[test]
    fn test_levels_of_empty_graph() {
        let g = WeaveGraph::new("empty");
        let order = execution_order(&g).unwrap();
        assert!(order.is_empty());
        assert!(compute_levels(&g, &order).is_empty());
    }
}
