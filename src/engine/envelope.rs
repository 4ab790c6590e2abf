// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// Final state of one graph run. There is no partial success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Success,
    Error,
}

/// What a caller receives from a run.
///
/// `outputs` is the serialized form. On success it maps `"node.port"` to each
/// terminal output value; on error it is `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub status: ExecutionStatus,
    pub outputs: String,
}

impl ResultEnvelope {
    pub fn success(outputs: &BTreeMap<String, Value>) -> Self {
        Self {
            status: ExecutionStatus::Success,
            outputs: Value::from_iter(outputs.clone()).to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        let mut body = serde_json::Map::new();
        body.insert("error".to_string(), Value::String(message.into()));
        Self {
            status: ExecutionStatus::Error,
            outputs: Value::Object(body).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }

    /// Deserializes `outputs` back into a keyed map.
    pub fn parsed_outputs(&self) -> Result<BTreeMap<String, Value>, serde_json::Error> {
        serde_json::from_str(&self.outputs)
    }

    /// The error message of a failed run.
    pub fn error_message(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        self.parsed_outputs()
            .ok()
            .and_then(|mut outputs| outputs.remove("error"))
            .and_then(|message| message.as_str().map(str::to_string))
    }
}
