// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The `basic` plugin: primitive types, identifiers, and a handful of nodes
//! for triggering runs and working with numbers and prompts.

pub mod nodes;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::definition::{NodeDefinition, PluginDefinition};
use crate::errors::{PluginError, TypeError};
use crate::traits::{NodeTable, Plugin};
use crate::types::{PortValues, PrimitiveType, TypeDefinition, Value};

use nodes::{CreatePrompt, FormatNumber, GetTimestamp, IsEven, Start};

pub const PLUGIN_NAME: &str = "basic";

pub const RULE_UUID_FORMAT: &str = "uuid_format";
pub const RULE_NON_EMPTY: &str = "non_empty";

pub struct BasicPlugin {
    definition: PluginDefinition,
    nodes: NodeTable,
}

impl BasicPlugin {
    pub fn new() -> Self {
        Self {
            definition: Self::build_definition(),
            nodes: NodeTable::new()
                .with(Arc::new(Start))
                .with(Arc::new(GetTimestamp))
                .with(Arc::new(IsEven))
                .with(Arc::new(FormatNumber))
                .with(Arc::new(CreatePrompt)),
        }
    }

    fn build_definition() -> PluginDefinition {
        PluginDefinition::new(PLUGIN_NAME, env!("CARGO_PKG_VERSION"), "Core types and utility nodes")
            .with_type(TypeDefinition::primitive("Int", PrimitiveType::Integer))
            .with_type(TypeDefinition::primitive("Bool", PrimitiveType::Boolean))
            .with_type(TypeDefinition::primitive("String", PrimitiveType::String))
            .with_type(TypeDefinition::semantic("Signal", "Bool", Vec::<String>::new()))
            .with_type(TypeDefinition::semantic("UUID", "String", [RULE_UUID_FORMAT]))
            .with_type(TypeDefinition::semantic("Label", "String", [RULE_NON_EMPTY]))
            .with_type(TypeDefinition::composite(
                "Prompt",
                [("id", "UUID"), ("name", "String"), ("content", "String")],
            ))
            .with_node(
                NodeDefinition::new(Start::NAME)
                    .output("signal", "Signal")
                    .output("execution_id", "UUID")
                    .described("Begins a run and mints its execution id"),
            )
            .with_node(
                NodeDefinition::new(GetTimestamp::NAME)
                    .input("trigger", "Signal")
                    .output("timestamp", "Int")
                    .output("done", "Signal")
                    .described("Current UTC time in milliseconds"),
            )
            .with_node(
                NodeDefinition::new(IsEven::NAME)
                    .input("number", "Int")
                    .input("trigger", "Signal")
                    .output("result", "Bool")
                    .output("done", "Signal"),
            )
            .with_node(
                NodeDefinition::new(FormatNumber::NAME)
                    .input("number", "Int")
                    .output("formatted", "String")
                    .output("done", "Signal"),
            )
            .with_node(
                NodeDefinition::new(CreatePrompt::NAME)
                    .input("name", "String")
                    .input("content", "String")
                    .output("prompt", "Prompt")
                    .described("Assembles a prompt with a fresh id"),
            )
    }
}

impl Default for BasicPlugin {
    fn default() -> Self {
        Self::new()
    }
}

fn is_uuid(value: &Value) -> bool {
    value.as_str().is_some_and(|text| Uuid::parse_str(text).is_ok())
}

#[async_trait]
impl Plugin for BasicPlugin {
    fn definition(&self) -> &PluginDefinition {
        &self.definition
    }

    fn check_validation_rule(&self, _type_name: &str, rule: &str, value: &Value) -> bool {
        match rule {
            RULE_UUID_FORMAT => is_uuid(value),
            RULE_NON_EMPTY => value.as_str().is_some_and(|text| !text.is_empty()),
            _ => false,
        }
    }

    fn adjust_default(&self, type_name: &str, base_default: Value) -> Value {
        match type_name {
            "UUID" => Value::String(Uuid::new_v4().to_string()),
            _ => base_default,
        }
    }

    fn convert_between(&self, value: Value, from: &str, to: &str) -> Result<Value, TypeError> {
        match (from, to) {
            ("UUID", "Label") => Ok(value),
            ("Label", "UUID") if is_uuid(&value) => Ok(value),
            ("Label", "UUID") => Err(TypeError::ConversionFailed {
                from: from.to_string(),
                to: to.to_string(),
                reason: "label is not a well-formed UUID".to_string(),
            }),
            _ => Err(TypeError::UnsupportedCast {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    async fn execute_node(&self, node_name: &str, inputs: PortValues) -> Result<PortValues, PluginError> {
        self.nodes.dispatch(PLUGIN_NAME, node_name, inputs).await
    }
}
