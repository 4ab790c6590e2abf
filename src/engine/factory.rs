// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{EngineConfig, Strategy};
use crate::engine::level_by_level::LevelByLevelExecutor;
use crate::engine::sequential::SequentialExecutor;
use crate::traits::DagExecutor;

/// Factory for creating DAG executors from configuration
pub struct ExecutorFactory;

impl ExecutorFactory {
    /// Create a DAG executor based on the configuration strategy
    pub fn from_config(cfg: &EngineConfig) -> Box<dyn DagExecutor> {
        match cfg.strategy {
            Strategy::Sequential => Box::new(SequentialExecutor::new()),
            Strategy::LevelByLevel => Box::new(LevelByLevelExecutor::new(
                cfg.executor_options.effective_concurrency(),
            )),
        }
    }
}
