// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Engine configuration.
///
/// Every field has a default, so an empty document (or no file at all) is a
/// valid configuration.
///
/// # Example
/// ```yaml
/// strategy: level_by_level
/// executor_options:
///   max_concurrency: 4
/// plugins: [basic]
/// anima_output: ./sanctum
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy: Strategy,
    pub executor_options: ExecutorOptions,
    /// Plugins registered by `Engine::initialize`; empty means every builtin plugin.
    pub plugins: Vec<String>,
    /// When set, `initialize` writes one generated `.anima` file per plugin here.
    pub anima_output: Option<PathBuf>,
}

/// How a scheduled graph is run.
///
/// * `Sequential` - one node at a time in topological order
/// * `LevelByLevel` - independent nodes of the same tier run concurrently
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Sequential,
    LevelByLevel,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::LevelByLevel => "level_by_level",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExecutorOptions {
    /// Upper bound on concurrently running nodes (level-by-level only).
    pub max_concurrency: Option<usize>,
}

impl ExecutorOptions {
    /// Configured concurrency, or the number of available CPUs.
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            })
            .max(1)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_full_config() {
        let yaml = r#"
strategy: level_by_level
executor_options:
  max_concurrency: 3
plugins: [basic]
anima_output: /tmp/sanctum
"#;

        let cfg: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.strategy, Strategy::LevelByLevel);
        assert_eq!(cfg.executor_options.effective_concurrency(), 3);
        assert_eq!(cfg.plugins, vec!["basic"]);
        assert_eq!(cfg.anima_output, Some(PathBuf::from("/tmp/sanctum")));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let cfg: EngineConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.strategy, Strategy::Sequential);
        assert!(cfg.executor_options.effective_concurrency() >= 1);
    }

    #[test]
    fn zero_concurrency_is_raised_to_one() {
        let options = ExecutorOptions {
            max_concurrency: Some(0),
        };
        assert_eq!(options.effective_concurrency(), 1);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "strategy: sequential\nplugins: []").unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.strategy, Strategy::Sequential);
        assert!(cfg.plugins.is_empty());
    }

    #[test]
    fn test_load_config_errors_name_the_path() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.yaml"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "strategy: [not, a, strategy]").unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Yaml { .. })));
    }
}
