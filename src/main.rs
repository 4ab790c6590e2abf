// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::process::ExitCode;

use anima_weave::config::{load_config, EngineConfig};
use anima_weave::engine::Engine;
use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run `.weave` graphs against the builtin plugins.
#[derive(Parser, Debug)]
#[command(name = "anima-weave", version)]
struct Cli {
    /// YAML engine configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the builtin plugins' .anima files into DIR and exit
    #[arg(long, value_name = "DIR", conflicts_with_all = ["sanctum", "graph"])]
    generate_anima: Option<PathBuf>,

    /// Directory holding the .weave files
    #[arg(required_unless_present = "generate_anima")]
    sanctum: Option<PathBuf>,

    /// Graph to run, without the .weave extension
    #[arg(required_unless_present = "generate_anima")]
    graph: Option<String>,
}

enum Command {
    Run { sanctum: PathBuf, graph: String },
    GenerateAnima { dir: PathBuf },
}

impl Cli {
    fn action(&self) -> Result<Command> {
        match (&self.generate_anima, &self.sanctum, &self.graph) {
            (Some(dir), _, _) => Ok(Command::GenerateAnima { dir: dir.clone() }),
            (None, Some(sanctum), Some(graph)) => Ok(Command::Run {
                sanctum: sanctum.clone(),
                graph: graph.clone(),
            }),
            _ => bail!("expected <SANCTUM> <GRAPH> or --generate-anima <DIR>"),
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    match cli.action()? {
        Command::GenerateAnima { dir } => {
            config.anima_output = Some(dir);
            Engine::new(config).initialize().await?;
            Ok(true)
        }
        Command::Run { sanctum, graph } => {
            let mut engine = Engine::new(config);
            engine.initialize().await?;
            let envelope = engine.execute_graph(&sanctum, &graph).await;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(envelope.is_success())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_takes_sanctum_and_graph() {
        let cli = Cli::try_parse_from(["anima-weave", "--config", "engine.yaml", "sanctum", "demo"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("engine.yaml")));
        match cli.action().unwrap() {
            Command::Run { sanctum, graph } => {
                assert_eq!(sanctum, PathBuf::from("sanctum"));
                assert_eq!(graph, "demo");
            }
            Command::GenerateAnima { .. } => panic!("expected a run"),
        }
    }

    #[test]
    fn test_generate_anima_stands_alone() {
        let cli = Cli::try_parse_from(["anima-weave", "--generate-anima", "out"]).unwrap();
        assert!(matches!(cli.action().unwrap(), Command::GenerateAnima { dir } if dir == PathBuf::from("out")));
        assert!(Cli::try_parse_from(["anima-weave", "--generate-anima", "out", "sanctum", "demo"]).is_err());
    }

    #[test]
    fn test_graph_name_is_required() {
        assert!(Cli::try_parse_from(["anima-weave", "sanctum"]).is_err());
        assert!(Cli::try_parse_from(["anima-weave"]).is_err());
    }
}
