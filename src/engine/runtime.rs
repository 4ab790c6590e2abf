// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The engine facade: plugin setup, graph loading and run reporting.
//!
//! A run moves through `Scheduling -> Executing -> {Success | Error}`. Every
//! failure along the way (unreadable file, parse error, unknown plugin,
//! invalid graph, cycle, node error) ends the run and is reported as an
//! `Error` envelope. Nothing escapes [`Engine::execute_graph`] as an `Err`.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::anima;
use crate::config::EngineConfig;
use crate::engine::envelope::ResultEnvelope;
use crate::engine::factory::ExecutorFactory;
use crate::engine::outputs::collect_terminal_outputs;
use crate::engine::scheduler::execution_order;
use crate::errors::{ExecutionError, PluginError};
use crate::graph::{validate_graph, wiring_warnings, WeaveGraph};
use crate::observability::messages::engine::{
    AnimaFilesWritten, EngineInitialized, ExecutionCompleted, ExecutionFailed,
    ExecutionOrderComputed, ExecutionStarted,
};
use crate::observability::messages::parser::GraphParsed;
use crate::observability::messages::validation::{PluginNotImported, WiringWarningDetected};
use crate::observability::messages::StructuredLog;
use crate::parser::parse_weave;
use crate::plugins::BuiltinLoader;
use crate::registry::PluginRegistry;
use crate::traits::{DagExecutor, Plugin, PluginLoader};
use crate::types::Value;

/// File extension of graph descriptions inside a sanctum directory.
pub const WEAVE_EXTENSION: &str = "weave";

pub struct Engine {
    config: EngineConfig,
    registry: PluginRegistry,
    loader: Arc<dyn PluginLoader>,
    executor: Box<dyn DagExecutor>,
    initialized: bool,
}

impl Engine {
    /// Engine backed by the builtin plugin table.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_loader(config, Arc::new(BuiltinLoader))
    }

    pub fn with_loader(config: EngineConfig, loader: Arc<dyn PluginLoader>) -> Self {
        let executor = ExecutorFactory::from_config(&config);
        Self {
            config,
            registry: PluginRegistry::new(),
            loader,
            executor,
            initialized: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Registers a plugin the loader does not know about.
    pub fn register_plugin(&mut self, plugin: Arc<dyn Plugin>) -> Result<(), PluginError> {
        self.registry.register(plugin)
    }

    /// Loads the configured plugins (every loader plugin when none are
    /// configured) and writes their `.anima` files if an output directory is
    /// set. Later calls do nothing.
    pub async fn initialize(&mut self) -> Result<(), ExecutionError> {
        if self.initialized {
            return Ok(());
        }

        let wanted = if self.config.plugins.is_empty() {
            self.loader.available()
        } else {
            self.config.plugins.clone()
        };
        self.registry.ensure_loaded(&wanted, self.loader.as_ref())?;

        if let Some(dir) = &self.config.anima_output {
            let written = anima::write_plugin_files(dir, &self.registry).await?;
            AnimaFilesWritten {
                directory: &dir.display().to_string(),
                file_count: written.len(),
            }
            .log();
        }

        EngineInitialized {
            plugins: &self.registry.names(),
        }
        .log();
        self.initialized = true;
        Ok(())
    }

    /// Reads `<sanctum>/<graph_name>.weave`, loads any plugin it references
    /// that is not registered yet, and runs it.
    pub async fn execute_graph(&mut self, sanctum: &Path, graph_name: &str) -> ResultEnvelope {
        let result = self.load_and_run(sanctum, graph_name).await;
        report(graph_name, result)
    }

    /// Runs an already parsed graph against the registered plugins.
    pub async fn execute(&self, graph: &WeaveGraph) -> ResultEnvelope {
        let result = self.run(graph).await;
        report(&graph.metadata.name, result)
    }

    async fn load_and_run(
        &mut self,
        sanctum: &Path,
        graph_name: &str,
    ) -> Result<BTreeMap<String, Value>, ExecutionError> {
        let graph = read_graph(sanctum, graph_name).await?;
        self.registry
            .ensure_loaded(&graph.referenced_plugins(), self.loader.as_ref())?;
        self.run(&graph).await
    }

    async fn run(&self, graph: &WeaveGraph) -> Result<BTreeMap<String, Value>, ExecutionError> {
        let name = graph.metadata.name.as_str();

        validate_graph(graph).map_err(ExecutionError::InvalidGraph)?;
        for plugin in graph.referenced_plugins() {
            if !self.registry.contains(&plugin) {
                return Err(PluginError::UnknownPlugin(plugin).into());
            }
            if !graph.imports.is_empty() && !graph.imports.contains(&plugin) {
                PluginNotImported {
                    graph: name,
                    plugin: &plugin,
                }
                .log();
            }
        }
        for warning in wiring_warnings(graph, &self.registry) {
            WiringWarningDetected {
                graph: name,
                warning: &warning,
            }
            .log();
        }

        let order = execution_order(graph)?;
        ExecutionOrderComputed {
            graph: name,
            order: &order,
        }
        .log();

        let started = ExecutionStarted {
            graph: name,
            strategy: self.executor.strategy_name(),
            node_count: order.len(),
        };
        started.log();
        let span = started.span("execute_graph");
        let clock = Instant::now();

        let results = self
            .executor
            .execute(&self.registry, graph, &order)
            .instrument(span)
            .await?;
        let terminal = collect_terminal_outputs(graph, &results);

        ExecutionCompleted {
            graph: name,
            node_count: results.len(),
            terminal_outputs: terminal.len(),
            duration: clock.elapsed(),
        }
        .log();
        Ok(terminal)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("strategy", &self.executor.strategy_name())
            .field("registry", &self.registry)
            .field("initialized", &self.initialized)
            .finish()
    }
}

/// Parses the named graph; an unnamed graph takes the requested name.
async fn read_graph(sanctum: &Path, graph_name: &str) -> Result<WeaveGraph, ExecutionError> {
    let path = sanctum.join(format!("{}.{}", graph_name, WEAVE_EXTENSION));
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ExecutionError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let mut graph = parse_weave(&text)?;
    if graph.metadata.name.is_empty() {
        graph.metadata.name = graph_name.to_string();
    }
    GraphParsed {
        graph: &graph.metadata.name,
        node_count: graph.nodes.len(),
        connection_count: graph.connections.len(),
        import_count: graph.imports.len(),
    }
    .log();
    Ok(graph)
}

fn report(graph_name: &str, result: Result<BTreeMap<String, Value>, ExecutionError>) -> ResultEnvelope {
    match result {
        Ok(outputs) => ResultEnvelope::success(&outputs),
        Err(err) => {
            ExecutionFailed {
                graph: graph_name,
                error: &err,
            }
            .log();
            ResultEnvelope::error(err.to_string())
        }
    }
}
