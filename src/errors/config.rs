// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use thiserror::Error;

/// Errors that can occur while loading the engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Structural problems found in a parsed weave graph before scheduling
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A connection endpoint names a node that was never declared
    UnknownConnectionEndpoint {
        /// The connection, rendered as `from.port -> to.port`
        connection: String,
        /// The node id that could not be found
        missing_node: String,
    },
    /// An entry point names a node that was never declared
    UnknownEntryPoint {
        /// The entry point id
        node_id: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownConnectionEndpoint {
                connection,
                missing_node,
            } => {
                write!(
                    f,
                    "Connection '{}' references node '{}' which does not exist",
                    connection, missing_node
                )
            }
            ValidationError::UnknownEntryPoint { node_id } => {
                write!(f, "Entry point '{}' does not exist", node_id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
