// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod anima;      // .anima generation
pub mod config;     // engine configuration
pub mod definition; // plugin and node declarations
pub mod engine;     // scheduling, executors, engine facade
pub mod errors;     // error handling
pub mod graph;      // weave graph model + validation
pub mod observability;
pub mod parser;     // .anima / .weave grammars
pub mod plugins;    // builtin plugins
pub mod registry;   // plugin registry
pub mod traits;     // unified abstractions
pub mod types;      // type system
