// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph validation warnings and errors.

use crate::graph::WiringWarning;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Cycle found while scheduling.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use anima_weave::observability::messages::validation::CircularDependencyDetected;
///
/// let msg = CircularDependencyDetected {
///     graph: "loop",
///     node_id: "a",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CircularDependencyDetected<'a> {
    pub graph: &'a str,
    pub node_id: &'a str,
}

impl Display for CircularDependencyDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Circular dependency detected in graph '{}' at node '{}'",
            self.graph, self.node_id
        )
    }
}

impl StructuredLog for CircularDependencyDetected<'_> {
    fn log(&self) {
        tracing::error!(graph = self.graph, node_id = self.node_id, "{}", self);
    }
}

/// Connection does not match plugin declarations.
///
/// # Log Level
/// `warn!` - Execution proceeds
pub struct WiringWarningDetected<'a> {
    pub graph: &'a str,
    pub warning: &'a WiringWarning,
}

impl Display for WiringWarningDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Graph '{}': {}", self.graph, self.warning)
    }
}

impl StructuredLog for WiringWarningDetected<'_> {
    fn log(&self) {
        tracing::warn!(graph = self.graph, "{}", self);
    }
}

/// A node uses a plugin the graph never imported.
///
/// # Log Level
/// `warn!` - Execution proceeds
pub struct PluginNotImported<'a> {
    pub graph: &'a str,
    pub plugin: &'a str,
}

impl Display for PluginNotImported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph '{}' uses plugin '{}' without importing it",
            self.graph, self.plugin
        )
    }
}

impl StructuredLog for PluginNotImported<'_> {
    fn log(&self) {
        tracing::warn!(graph = self.graph, plugin = self.plugin, "{}", self);
    }
}
