// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic event is a small struct implementing `Display` (the human
//! readable line) and [`messages::StructuredLog`] (the same event with typed
//! fields at its log level). Call sites never format log strings inline.
//!
//! # Usage
//!
//! ```rust
//! use anima_weave::observability::messages::node::NodeExecutionFailed;
//! use anima_weave::observability::messages::StructuredLog;
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
//! NodeExecutionFailed {
//!     node_id: "formatter",
//!     error: &error,
//! }
//! .log();
//! ```

pub mod messages;
