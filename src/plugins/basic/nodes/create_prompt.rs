// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::errors::PluginError;
use crate::plugins::ports;
use crate::traits::NodeExecutor;
use crate::types::PortValues;

/// Builds a `Prompt` record from a name and its content.
pub struct CreatePrompt;

impl CreatePrompt {
    pub const NAME: &'static str = "CreatePrompt";
}

#[async_trait]
impl NodeExecutor for CreatePrompt {
    async fn execute(&self, inputs: PortValues) -> Result<PortValues, PluginError> {
        let name = ports::require_str(&inputs, Self::NAME, "name")?;
        let content = ports::require_str(&inputs, Self::NAME, "content")?;

        let prompt = json!({
            "id": Uuid::new_v4().to_string(),
            "name": name,
            "content": content,
        });
        Ok(PortValues::from([("prompt".to_string(), prompt)]))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::BasicPlugin;
    use crate::traits::Plugin;

    #[tokio::test]
    async fn test_prompt_is_a_valid_composite() {
        let inputs = PortValues::from([
            ("name".to_string(), json!("greeting")),
            ("content".to_string(), json!("Hello")),
        ]);
        let outputs = CreatePrompt.execute(inputs).await.unwrap();

        let prompt = &outputs["prompt"];
        assert_eq!(prompt["name"], json!("greeting"));
        assert!(BasicPlugin::new().validate_value(prompt, "Prompt"));
    }

    #[tokio::test]
    async fn test_content_must_be_text() {
        let inputs = PortValues::from([
            ("name".to_string(), json!("greeting")),
            ("content".to_string(), json!(5)),
        ]);
        assert!(CreatePrompt.execute(inputs).await.is_err());
    }
}
