// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// A `.weave` document parsed into a graph.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct GraphParsed<'a> {
    pub graph: &'a str,
    pub node_count: usize,
    pub connection_count: usize,
    pub import_count: usize,
}

impl Display for GraphParsed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Parsed graph '{}': {} nodes, {} connections, {} imports",
            self.graph, self.node_count, self.connection_count, self.import_count
        )
    }
}

impl StructuredLog for GraphParsed<'_> {
    fn log(&self) {
        tracing::debug!(
            graph = self.graph,
            node_count = self.node_count,
            connection_count = self.connection_count,
            import_count = self.import_count,
            "{}", self
        );
    }
}
