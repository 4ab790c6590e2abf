// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::errors::PluginError;
use crate::plugins::ports;
use crate::traits::NodeExecutor;
use crate::types::PortValues;

/// Reads the wall clock once the trigger arrives.
pub struct GetTimestamp;

impl GetTimestamp {
    pub const NAME: &'static str = "GetTimestamp";
}

#[async_trait]
impl NodeExecutor for GetTimestamp {
    async fn execute(&self, inputs: PortValues) -> Result<PortValues, PluginError> {
        ports::require(&inputs, Self::NAME, "trigger")?;

        Ok(PortValues::from([
            ("timestamp".to_string(), json!(Utc::now().timestamp_millis())),
            ("done".to_string(), json!(true)),
        ]))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
