// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for plugin resolution and node dispatch.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// The graph references a plugin that no loader can provide.
    #[error("Unknown plugin '{0}'")]
    UnknownPlugin(String),

    /// The plugin has no implementation for the requested node.
    #[error("Plugin '{plugin}' does not implement node '{node}'")]
    UnknownNode { plugin: String, node: String },

    /// A node implementation found a required input absent or mistyped.
    #[error("Node '{node}' input '{port}' is missing or invalid: expected {expected}")]
    MissingOrInvalidInput {
        node: String,
        port: String,
        expected: String,
    },

    /// A plugin with the same name is already registered.
    #[error("Plugin '{0}' is already registered")]
    DuplicatePlugin(String),

    /// A node implementation failed for a reason of its own.
    #[error("Node '{node}' failed: {reason}")]
    NodeFailed { node: String, reason: String },
}
