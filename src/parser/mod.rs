// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Text front ends: `.anima` plugin manifests and `.weave` graph descriptions.
//!
//! Both grammars share one tokenizer. Malformed input always yields a
//! [`ParseError`](crate::errors::ParseError) carrying the line, column and
//! offending fragment; there are no partial results.

pub mod anima;
pub mod lexer;
pub mod weave;

pub use anima::{parse_anima, AnimaDefinition, AnimaNode, AnimaType};
pub use weave::{parse_weave, ANIMA_SUFFIX};
