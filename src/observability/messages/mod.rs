// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `engine` - initialization and graph run lifecycle
//! * `node` - per-node execution lifecycle
//! * `parser` - graph and manifest parsing
//! * `plugin` - plugin registration and loading
//! * `validation` - cycles, wiring warnings, import mismatches

pub mod engine;
pub mod node;
pub mod parser;
pub mod plugin;
pub mod validation;

use tracing::Span;

/// A log event that knows its level and structured fields.
pub trait StructuredLog {
    /// Emits the event at its level with structured fields.
    fn log(&self);

    /// Builds a span carrying the event's fields.
    fn span(&self, name: &str) -> Span {
        tracing::info_span!("event", span_name = name)
    }
}
