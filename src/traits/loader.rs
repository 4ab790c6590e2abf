// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::traits::Plugin;

/// Resolves plugin names to instances.
///
/// Resolution is a lookup in a table known at process start; there is no
/// runtime module loading.
pub trait PluginLoader: Send + Sync {
    /// Builds the named plugin, or `None` when this loader does not provide it.
    fn load(&self, name: &str) -> Option<Arc<dyn Plugin>>;

    /// Every plugin name this loader can provide.
    fn available(&self) -> Vec<String>;
}
