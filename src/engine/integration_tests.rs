// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end runs: `.weave` files on disk through parsing, plugin
//! resolution, scheduling, execution and envelope reporting.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

use crate::config::{EngineConfig, Strategy};
use crate::definition::{NodeDefinition, PluginDefinition};
use crate::engine::{Engine, ExecutionStatus};
use crate::errors::PluginError;
use crate::parser::parse_anima;
use crate::traits::Plugin;
use crate::types::PortValues;

/// Test plugin that records the inputs every `Record` node observes.
struct ProbePlugin {
    definition: PluginDefinition,
    observed: Mutex<Vec<PortValues>>,
}

impl ProbePlugin {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            definition: PluginDefinition::new("probe", "0.1.0", "records node inputs")
                .with_node(NodeDefinition::new("Emit").input("seed", "basic.Int").output("value", "basic.Int"))
                .with_node(NodeDefinition::new("Record").input("number", "basic.Int").output("echo", "basic.Int")),
            observed: Mutex::new(Vec::new()),
        })
    }

    fn observed(&self) -> Vec<PortValues> {
        self.observed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Plugin for ProbePlugin {
    fn definition(&self) -> &PluginDefinition {
        &self.definition
    }

    async fn execute_node(&self, node_name: &str, inputs: PortValues) -> Result<PortValues, PluginError> {
        match node_name {
            "Emit" => {
                let value = inputs.get("seed").cloned().unwrap_or(json!(1));
                Ok(PortValues::from([("value".to_string(), value)]))
            }
            "Record" => {
                self.observed.lock().unwrap().push(inputs.clone());
                let number = inputs.get("number").cloned().unwrap_or(json!(null));
                Ok(PortValues::from([("echo".to_string(), number)]))
            }
            other => Err(PluginError::UnknownNode {
                plugin: "probe".into(),
                node: other.into(),
            }),
        }
    }
}

fn sanctum(graphs: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, text) in graphs {
        std::fs::write(dir.path().join(format!("{}.weave", name)), text).unwrap();
    }
    dir
}

fn engine_with_probe(strategy: Strategy) -> (Engine, Arc<ProbePlugin>) {
    let config = EngineConfig {
        strategy,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config);
    let probe = ProbePlugin::new();
    engine.register_plugin(probe.clone()).unwrap();
    (engine, probe)
}

const TIMESTAMP_DEMO: &str = r#"
-- import
basic.anima
--

-- graph
nodes {
    start: basic.Start
    timer: basic.GetTimestamp
    even: basic.IsEven
    fmt: basic.FormatNumber
}
control {
    start.signal -> timer.trigger
    timer.done -> even.trigger
}
data {
    timer.timestamp -> even.number
    timer.timestamp -> fmt.number
}
--
"#;

#[tokio::test]
async fn test_four_node_chain_reports_only_terminal_outputs() {
    let dir = sanctum(&[("timestamp_demo", TIMESTAMP_DEMO)]);
    let mut engine = Engine::new(EngineConfig::default());
    engine.initialize().await.unwrap();

    let envelope = engine.execute_graph(dir.path(), "timestamp_demo").await;

    assert_eq!(envelope.status, ExecutionStatus::Success, "{}", envelope.outputs);
    let outputs = envelope.parsed_outputs().unwrap();
    let keys: Vec<&str> = outputs.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["even.done", "even.result", "fmt.done", "fmt.formatted", "start.execution_id"]
    );
    assert!(!outputs.contains_key("timer.timestamp"));
    assert!(!outputs.contains_key("start.signal"));

    let formatted = outputs["fmt.formatted"].as_str().unwrap();
    let timestamp: i64 = formatted.strip_prefix("Number: ").unwrap().parse().unwrap();
    assert_eq!(outputs["even.result"], json!(timestamp % 2 == 0));
    assert!(uuid::Uuid::parse_str(outputs["start.execution_id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_referenced_plugins_load_on_demand() {
    let dir = sanctum(&[("timestamp_demo", TIMESTAMP_DEMO)]);
    let mut engine = Engine::new(EngineConfig::default());
    assert!(engine.registry().is_empty());

    let envelope = engine.execute_graph(dir.path(), "timestamp_demo").await;

    assert!(envelope.is_success());
    assert!(engine.registry().contains("basic"));
}

#[tokio::test]
async fn test_cycle_fails_before_any_node_runs() {
    let weave = r#"
-- graph loop
nodes {
    seed: probe.Emit
    a: probe.Record
    b: probe.Record
}
data {
    seed.value -> a.number
    a.echo -> b.number
    b.echo -> a.number
}
entry {
    seed
}
--
"#;
    let dir = sanctum(&[("loop", weave)]);
    let (mut engine, probe) = engine_with_probe(Strategy::Sequential);

    let envelope = engine.execute_graph(dir.path(), "loop").await;

    assert_eq!(envelope.status, ExecutionStatus::Error);
    let message = envelope.error_message().unwrap();
    assert!(message.contains("Circular dependency"), "{}", message);
    assert!(message.contains("'a'") || message.contains("'b'"), "{}", message);
    assert!(probe.observed().is_empty());
}

#[tokio::test]
async fn test_static_parameter_wins_over_connection() {
    let weave = r#"
-- graph
nodes {
    source: probe.Emit { seed = 3 }
    sink: probe.Record { number = 7 }
}
data {
    source.value -> sink.number
}
--
"#;
    let dir = sanctum(&[("params", weave)]);
    let (mut engine, probe) = engine_with_probe(Strategy::Sequential);

    let envelope = engine.execute_graph(dir.path(), "params").await;

    assert!(envelope.is_success(), "{}", envelope.outputs);
    assert_eq!(probe.observed(), vec![PortValues::from([("number".to_string(), json!(7))])]);
    let outputs = envelope.parsed_outputs().unwrap();
    assert_eq!(outputs["sink.echo"], json!(7));
    assert!(!outputs.contains_key("source.value"));
}

#[tokio::test]
async fn test_unknown_plugin_aborts_before_execution() {
    let weave = r#"
-- graph
nodes {
    first: probe.Emit
    second: ghost.Haunt
    third: probe.Record
}
data {
    first.value -> third.number
}
--
"#;
    let dir = sanctum(&[("haunted", weave)]);
    let (mut engine, probe) = engine_with_probe(Strategy::Sequential);

    let envelope = engine.execute_graph(dir.path(), "haunted").await;

    assert_eq!(envelope.error_message().as_deref(), Some("Unknown plugin 'ghost'"));
    assert!(probe.observed().is_empty());
}

#[tokio::test]
async fn test_unknown_node_type_is_reported() {
    let weave = "-- graph\nnodes {\n x: basic.Teleport\n}\n--\n";
    let dir = sanctum(&[("teleport", weave)]);
    let mut engine = Engine::new(EngineConfig::default());

    let envelope = engine.execute_graph(dir.path(), "teleport").await;

    assert_eq!(
        envelope.error_message().as_deref(),
        Some("Node 'x' failed: Plugin 'basic' does not implement node 'Teleport'")
    );
}

#[tokio::test]
async fn test_node_failure_discards_partial_outputs() {
    let weave = r#"
-- graph
nodes {
    start: basic.Start
    fmt: basic.FormatNumber
}
control {
    start.signal -> fmt.trigger
}
--
"#;
    let dir = sanctum(&[("broken", weave)]);
    let mut engine = Engine::new(EngineConfig::default());

    let envelope = engine.execute_graph(dir.path(), "broken").await;

    assert_eq!(envelope.status, ExecutionStatus::Error);
    let outputs = envelope.parsed_outputs().unwrap();
    assert_eq!(outputs.len(), 1);
    assert!(outputs["error"].as_str().unwrap().contains("'number'"));
}

#[tokio::test]
async fn test_parse_error_becomes_error_envelope() {
    let dir = sanctum(&[("garbled", "-- graph\nnodes {\n a basic.Start\n}\n--\n")]);
    let mut engine = Engine::new(EngineConfig::default());

    let envelope = engine.execute_graph(dir.path(), "garbled").await;

    let message = envelope.error_message().unwrap();
    assert!(message.starts_with("weave parse error at line 3"), "{}", message);
}

#[tokio::test]
async fn test_missing_graph_file_names_the_path() {
    let dir = sanctum(&[]);
    let mut engine = Engine::new(EngineConfig::default());

    let envelope = engine.execute_graph(dir.path(), "absent").await;

    let message = envelope.error_message().unwrap();
    assert!(message.contains("absent.weave"), "{}", message);
}

#[tokio::test]
async fn test_undeclared_node_in_connection_is_invalid() {
    let weave = "-- graph\nnodes {\n a: basic.Start\n}\ndata {\n a.signal -> ghost.in\n}\n--\n";
    let dir = sanctum(&[("dangling", weave)]);
    let mut engine = Engine::new(EngineConfig::default());

    let envelope = engine.execute_graph(dir.path(), "dangling").await;

    let message = envelope.error_message().unwrap();
    assert!(message.starts_with("Invalid graph"), "{}", message);
    assert!(message.contains("ghost"));
}

#[tokio::test]
async fn test_strategies_produce_identical_envelopes() {
    let weave = r#"
-- graph fan
nodes {
    left: probe.Emit { seed = 2 }
    right: probe.Emit { seed = 5 }
    l_sink: probe.Record
    r_sink: probe.Record
    lonely: probe.Emit
}
data {
    left.value -> l_sink.number
    right.value -> r_sink.number
}
--
"#;
    let dir = sanctum(&[("fan", weave)]);

    let mut envelopes = Vec::new();
    for strategy in [Strategy::Sequential, Strategy::LevelByLevel] {
        let (mut engine, _probe) = engine_with_probe(strategy);
        envelopes.push(engine.execute_graph(dir.path(), "fan").await);
    }

    assert!(envelopes[0].is_success());
    assert_eq!(envelopes[0], envelopes[1]);
    let outputs = envelopes[0].parsed_outputs().unwrap();
    assert_eq!(outputs["l_sink.echo"], json!(2));
    assert_eq!(outputs["r_sink.echo"], json!(5));
    assert_eq!(outputs["lonely.value"], json!(1));
}

#[tokio::test]
async fn test_strategies_report_the_same_failure_across_tiers() {
    // order is a, b, c: c fails in the first tier, b in the second
    let weave = r#"
-- graph staggered
nodes {
    c: basic.FormatNumber
    a: basic.Start
    b: basic.IsEven
}
control {
    a.signal -> b.trigger
}
--
"#;
    let dir = sanctum(&[("staggered", weave)]);

    let mut envelopes = Vec::new();
    for strategy in [Strategy::Sequential, Strategy::LevelByLevel] {
        let (mut engine, _probe) = engine_with_probe(strategy);
        envelopes.push(engine.execute_graph(dir.path(), "staggered").await);
    }

    assert_eq!(envelopes[0], envelopes[1]);
    let message = envelopes[0].error_message().unwrap();
    assert!(message.starts_with("Node 'b' failed: "), "{}", message);
    assert!(message.contains("'number'"), "{}", message);
}

#[tokio::test]
async fn test_execute_parsed_graph_directly() {
    let mut graph = crate::parser::parse_weave(TIMESTAMP_DEMO).unwrap();
    graph.metadata.name = "inline".into();
    let mut engine = Engine::new(EngineConfig::default());

    let before = engine.execute(&graph).await;
    assert_eq!(before.error_message().as_deref(), Some("Unknown plugin 'basic'"));

    engine.initialize().await.unwrap();
    assert!(engine.execute(&graph).await.is_success());
}

#[tokio::test]
async fn test_initialize_is_idempotent_and_writes_anima_files() {
    let out = tempfile::tempdir().unwrap();
    let config = EngineConfig {
        anima_output: Some(out.path().to_path_buf()),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config);

    engine.initialize().await.unwrap();
    engine.initialize().await.unwrap();

    assert_eq!(engine.registry().names(), vec!["basic".to_string()]);
    let text = std::fs::read_to_string(out.path().join("basic.anima")).unwrap();
    let parsed = parse_anima(&text).unwrap();
    assert!(parsed.find_node("GetTimestamp").is_some());
    assert!(parsed.find_type("Prompt").unwrap().is_composite());
}

#[tokio::test]
async fn test_initialize_rejects_unknown_configured_plugin() {
    let config = EngineConfig {
        plugins: vec!["basic".into(), "openai".into()],
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config);

    let err = engine.initialize().await.unwrap_err();
    assert_eq!(err.to_string(), "Unknown plugin 'openai'");
}
