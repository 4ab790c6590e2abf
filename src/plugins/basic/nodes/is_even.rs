// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::json;

use crate::errors::PluginError;
use crate::plugins::ports;
use crate::traits::NodeExecutor;
use crate::types::PortValues;

pub struct IsEven;

impl IsEven {
    pub const NAME: &'static str = "IsEven";
}

#[async_trait]
impl NodeExecutor for IsEven {
    async fn execute(&self, inputs: PortValues) -> Result<PortValues, PluginError> {
        let number = ports::require_int(&inputs, Self::NAME, "number")?;
        ports::require(&inputs, Self::NAME, "trigger")?;

        Ok(PortValues::from([
            ("result".to_string(), json!(number % 2 == 0)),
            ("done".to_string(), json!(true)),
        ]))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
