// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while reading `.anima` and `.weave` text.

use thiserror::Error;

/// A malformed `.anima` or `.weave` document.
///
/// Carries the 1-based position of the offending token and the token text
/// itself so callers can point at the fragment that broke the grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source_kind} parse error at line {line}, column {column} near '{fragment}': {message}")]
pub struct ParseError {
    /// Which grammar rejected the input (`anima` or `weave`).
    pub source_kind: &'static str,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub fragment: String,
}

impl ParseError {
    pub fn new(
        source_kind: &'static str,
        message: impl Into<String>,
        line: usize,
        column: usize,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            source_kind,
            message: message.into(),
            line,
            column,
            fragment: fragment.into(),
        }
    }
}
