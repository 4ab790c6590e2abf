// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Top-level failure of a single graph run.
//!
//! Every variant is fatal to the run. The engine renders the `Display` form
//! into the `Error` envelope, so messages name the node, plugin or type that
//! triggered the failure.

use thiserror::Error;

use super::{ParseError, PluginError, ValidationError};

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// A node instance failed while running; `node` is the instance id.
    #[error("Node '{node}' failed: {source}")]
    NodeExecution {
        node: String,
        #[source]
        source: PluginError,
    },

    /// A node was revisited while still in progress during scheduling.
    #[error("Circular dependency detected at node '{node}': {}", .cycle.join(" -> "))]
    CircularDependency { node: String, cycle: Vec<String> },

    /// An executor was handed a node id the graph does not declare.
    #[error("Node '{node}' is referenced but not declared")]
    UnknownNodeReference { node: String },

    /// The graph failed structural validation.
    #[error("Invalid graph: {}", join_messages(.0))]
    InvalidGraph(Vec<ValidationError>),

    #[error("Failed to read graph '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A node task could not be joined (panicked or was cancelled).
    #[error("Node task for '{node}' did not complete: {reason}")]
    JoinFailed { node: String, reason: String },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
