// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::errors::PluginError;
use crate::traits::NodeExecutor;
use crate::types::PortValues;

/// Entry node: emits a trigger signal and a fresh execution id.
pub struct Start;

impl Start {
    pub const NAME: &'static str = "Start";
}

#[async_trait]
impl NodeExecutor for Start {
    async fn execute(&self, _inputs: PortValues) -> Result<PortValues, PluginError> {
        Ok(PortValues::from([
            ("signal".to_string(), json!(true)),
            ("execution_id".to_string(), json!(Uuid::new_v4().to_string())),
        ]))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_each_run_gets_a_new_execution_id() {
        let first = Start.execute(PortValues::new()).await.unwrap();
        let second = Start.execute(PortValues::new()).await.unwrap();

        assert_eq!(first["signal"], json!(true));
        let id = first["execution_id"].as_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        assert_ne!(first["execution_id"], second["execution_id"]);
    }
}
