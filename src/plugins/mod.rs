// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Plugins compiled into the binary.
//!
//! [`BuiltinLoader`] is the capability table the engine consults when a graph
//! names a plugin that is not registered yet. Adding a plugin means adding a
//! module here and a match arm in [`BuiltinLoader::load`].

pub mod basic;
pub mod ports;

pub use basic::BasicPlugin;

use std::sync::Arc;

use crate::traits::{Plugin, PluginLoader};

/// Names of every plugin [`BuiltinLoader`] can build.
pub const BUILTIN_PLUGINS: &[&str] = &[basic::PLUGIN_NAME];

/// Static plugin table for the plugins shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLoader;

impl PluginLoader for BuiltinLoader {
    fn load(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        match name {
            basic::PLUGIN_NAME => Some(Arc::new(BasicPlugin::new())),
            _ => None,
        }
    }

    fn available(&self) -> Vec<String> {
        BUILTIN_PLUGINS.iter().map(|name| name.to_string()).collect()
    }
}
