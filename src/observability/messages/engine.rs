// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for engine initialization and graph run lifecycle.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Engine finished loading its statically known plugins.
///
/// # Log Level
/// `info!` - Important operational event
pub struct EngineInitialized<'a> {
    pub plugins: &'a [String],
}

impl Display for EngineInitialized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine initialized with {} plugins: {}",
            self.plugins.len(),
            self.plugins.join(", ")
        )
    }
}

impl StructuredLog for EngineInitialized<'_> {
    fn log(&self) {
        tracing::info!(plugin_count = self.plugins.len(), "{}", self);
    }
}

/// Graph execution started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use anima_weave::observability::messages::engine::ExecutionStarted;
///
/// let msg = ExecutionStarted {
///     graph: "timestamp_demo",
///     strategy: "sequential",
///     node_count: 4,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExecutionStarted<'a> {
    pub graph: &'a str,
    pub strategy: &'a str,
    pub node_count: usize,
}

impl Display for ExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting graph '{}' with {} strategy: {} nodes",
            self.graph, self.strategy, self.node_count
        )
    }
}

impl StructuredLog for ExecutionStarted<'_> {
    fn log(&self) {
        tracing::info!(
            graph = self.graph,
            strategy = self.strategy,
            node_count = self.node_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution",
            span_name = name,
            graph = self.graph,
            strategy = self.strategy,
            node_count = self.node_count,
        )
    }
}

/// Execution order computed by the scheduler.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct ExecutionOrderComputed<'a> {
    pub graph: &'a str,
    pub order: &'a [String],
}

impl Display for ExecutionOrderComputed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Execution order for '{}': {}",
            self.graph,
            self.order.join(" -> ")
        )
    }
}

impl StructuredLog for ExecutionOrderComputed<'_> {
    fn log(&self) {
        tracing::debug!(graph = self.graph, node_count = self.order.len(), "{}", self);
    }
}

/// Graph execution completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExecutionCompleted<'a> {
    pub graph: &'a str,
    pub node_count: usize,
    pub terminal_outputs: usize,
    pub duration: std::time::Duration,
}

impl Display for ExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph '{}' completed: {} nodes, {} terminal outputs in {:?}",
            self.graph, self.node_count, self.terminal_outputs, self.duration
        )
    }
}

impl StructuredLog for ExecutionCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            graph = self.graph,
            node_count = self.node_count,
            terminal_outputs = self.terminal_outputs,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Graph execution failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ExecutionFailed<'a> {
    pub graph: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Graph '{}' failed: {}", self.graph, self.error)
    }
}

impl StructuredLog for ExecutionFailed<'_> {
    fn log(&self) {
        tracing::error!(graph = self.graph, error = %self.error, "{}", self);
    }
}

/// Generated `.anima` files written to disk.
///
/// # Log Level
/// `info!` - Important operational event
pub struct AnimaFilesWritten<'a> {
    pub directory: &'a str,
    pub file_count: usize,
}

impl Display for AnimaFilesWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} generated .anima files to '{}'",
            self.file_count, self.directory
        )
    }
}

impl StructuredLog for AnimaFilesWritten<'_> {
    fn log(&self) {
        tracing::info!(
            directory = self.directory,
            file_count = self.file_count,
            "{}", self
        );
    }
}
