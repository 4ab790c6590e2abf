// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::json;

use crate::errors::PluginError;
use crate::plugins::ports;
use crate::traits::NodeExecutor;
use crate::types::PortValues;

/// Renders an integer as `"Number: {n}"`.
pub struct FormatNumber;

impl FormatNumber {
    pub const NAME: &'static str = "FormatNumber";
}

#[async_trait]
impl NodeExecutor for FormatNumber {
    async fn execute(&self, inputs: PortValues) -> Result<PortValues, PluginError> {
        let number = ports::require_int(&inputs, Self::NAME, "number")?;

        Ok(PortValues::from([
            ("formatted".to_string(), json!(format!("Number: {}", number))),
            ("done".to_string(), json!(true)),
        ]))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
