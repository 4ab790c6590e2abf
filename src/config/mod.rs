// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod loader;

pub use loader::{load_config, EngineConfig, ExecutorOptions, Strategy};
