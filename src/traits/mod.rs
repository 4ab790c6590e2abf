// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod executor;
pub mod loader;
pub mod node;
pub mod plugin;

pub use executor::{DagExecutor, NodeOutputs};
pub use loader::PluginLoader;
pub use node::{NodeExecutor, NodeTable};
pub use plugin::Plugin;
