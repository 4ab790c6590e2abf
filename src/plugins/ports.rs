// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Input accessors shared by node implementations.
//!
//! Each accessor fails with [`PluginError::MissingOrInvalidInput`] naming the
//! node, the port and the expected shape.

use crate::errors::PluginError;
use crate::types::{PortValues, Value};

fn invalid(node: &str, port: &str, expected: &str) -> PluginError {
    PluginError::MissingOrInvalidInput {
        node: node.to_string(),
        port: port.to_string(),
        expected: expected.to_string(),
    }
}

pub fn require<'a>(inputs: &'a PortValues, node: &str, port: &str) -> Result<&'a Value, PluginError> {
    inputs.get(port).ok_or_else(|| invalid(node, port, "a value"))
}

pub fn require_int(inputs: &PortValues, node: &str, port: &str) -> Result<i64, PluginError> {
    inputs
        .get(port)
        .and_then(Value::as_i64)
        .ok_or_else(|| invalid(node, port, "an integer"))
}

pub fn require_bool(inputs: &PortValues, node: &str, port: &str) -> Result<bool, PluginError> {
    inputs
        .get(port)
        .and_then(Value::as_bool)
        .ok_or_else(|| invalid(node, port, "a boolean"))
}

pub fn require_str<'a>(inputs: &'a PortValues, node: &str, port: &str) -> Result<&'a str, PluginError> {
    inputs
        .get(port)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(node, port, "a string"))
}
