// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod execution;
mod parse;
mod plugin;
mod types;

pub use config::{ConfigError, ValidationError};
pub use execution::ExecutionError;
pub use parse::ParseError;
pub use plugin::PluginError;
pub use types::TypeError;
