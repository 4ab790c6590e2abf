// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Plugin added to the registry.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct PluginRegistered<'a> {
    pub plugin: &'a str,
    pub version: &'a str,
    pub type_count: usize,
    pub node_count: usize,
}

impl Display for PluginRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered plugin '{}' v{}: {} types, {} nodes",
            self.plugin, self.version, self.type_count, self.node_count
        )
    }
}

impl StructuredLog for PluginRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            plugin = self.plugin,
            version = self.version,
            type_count = self.type_count,
            node_count = self.node_count,
            "{}", self
        );
    }
}

/// Plugin resolved on demand for a graph.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PluginLoaded<'a> {
    pub plugin: &'a str,
}

impl Display for PluginLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Loaded plugin '{}' on demand", self.plugin)
    }
}

impl StructuredLog for PluginLoaded<'_> {
    fn log(&self) {
        tracing::info!(plugin = self.plugin, "{}", self);
    }
}
