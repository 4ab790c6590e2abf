// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod dispatch;
pub mod envelope;
pub mod factory;
pub mod level_by_level;
pub mod outputs;
pub mod runtime;
pub mod scheduler;
pub mod sequential;
#[cfg(test)]
mod integration_tests;

pub use envelope::{ExecutionStatus, ResultEnvelope};
pub use factory::ExecutorFactory;
pub use level_by_level::LevelByLevelExecutor;
pub use outputs::collect_terminal_outputs;
pub use runtime::{Engine, WEAVE_EXTENSION};
pub use scheduler::{compute_levels, execution_order};
pub use sequential::SequentialExecutor;
