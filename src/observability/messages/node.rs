// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for per-node execution events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Node execution started.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use anima_weave::observability::messages::node::NodeExecutionStarted;
///
/// let msg = NodeExecutionStarted {
///     node_id: "timer",
///     plugin: "basic",
///     node_type: "GetTimestamp",
///     input_count: 1,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct NodeExecutionStarted<'a> {
    pub node_id: &'a str,
    pub plugin: &'a str,
    pub node_type: &'a str,
    pub input_count: usize,
}

impl Display for NodeExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' ({}.{}) started with {} inputs",
            self.node_id, self.plugin, self.node_type, self.input_count
        )
    }
}

impl StructuredLog for NodeExecutionStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            plugin = self.plugin,
            node_type = self.node_type,
            input_count = self.input_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node",
            span_name = name,
            node_id = self.node_id,
            plugin = self.plugin,
            node_type = self.node_type,
        )
    }
}

/// Node execution completed.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct NodeExecutionCompleted<'a> {
    pub node_id: &'a str,
    pub output_count: usize,
    pub duration: std::time::Duration,
}

impl Display for NodeExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' completed: {} outputs in {:?}",
            self.node_id, self.output_count, self.duration
        )
    }
}

impl StructuredLog for NodeExecutionCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            output_count = self.output_count,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }
}

/// Node execution failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct NodeExecutionFailed<'a> {
    pub node_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for NodeExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Node '{}' failed: {}", self.node_id, self.error)
    }
}

impl StructuredLog for NodeExecutionFailed<'_> {
    fn log(&self) {
        tracing::error!(node_id = self.node_id, error = %self.error, "{}", self);
    }
}
