// src/config/model.rs

use serde::{Deserialize, Serialize};

use crate::cpm::{CpmEngine, DEFAULT_ITERATION_FACTOR};
use crate::hierarchy::CollapseState;
use crate::model::Task;
use crate::types::ScheduleStrategy;

/// A plan as read from disk, before validation.
///
/// TOML form:
///
/// ```toml
/// [config]
/// strategy = "topo-first"
/// iteration_factor = 2
///
/// [collapsed]
/// P1 = true
///
/// [[task]]
/// id = "A"
/// name = "Design"
/// start = "2024-01-01"     # a bare TOML date works too
/// end = "2024-01-05"
/// dependencies = "X, Y"
/// parentId = "P1"
/// ```
///
/// The JSON form has the same shape (`{"config": .., "collapsed": ..,
/// "task": [..]}`); `tasks` is accepted as an alias of `task`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPlanFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Collapse state of the table, `task id -> collapsed`.
    #[serde(default)]
    pub collapsed: CollapseState,

    /// Tasks in display order.
    #[serde(default, alias = "tasks")]
    pub task: Vec<Task>,
}

/// `[config]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSection {
    /// `"iterate"` (default) or `"topo-first"`.
    #[serde(default)]
    pub strategy: ScheduleStrategy,

    /// Sweeps allowed per task before a pass stops; must be >= 1.
    #[serde(default = "default_iteration_factor")]
    pub iteration_factor: usize,

    /// Roll up every parent's span when the plan is first loaded, not only
    /// after edits.
    #[serde(default)]
    pub rollup_on_load: bool,
}

fn default_iteration_factor() -> usize {
    DEFAULT_ITERATION_FACTOR
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            strategy: ScheduleStrategy::default(),
            iteration_factor: default_iteration_factor(),
            rollup_on_load: false,
        }
    }
}

impl ConfigSection {
    pub fn engine(&self) -> CpmEngine {
        CpmEngine::new(self.strategy, self.iteration_factor)
    }
}

/// A validated plan. Only constructible through `TryFrom<RawPlanFile>`.
#[derive(Debug, Clone)]
pub struct PlanFile {
    config: ConfigSection,
    collapsed: CollapseState,
    tasks: Vec<Task>,
}

impl PlanFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        collapsed: CollapseState,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            config,
            collapsed,
            tasks,
        }
    }

    pub fn config(&self) -> &ConfigSection {
        &self.config
    }

    pub fn collapsed(&self) -> &CollapseState {
        &self.collapsed
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn set_strategy(&mut self, strategy: ScheduleStrategy) {
        self.config.strategy = strategy;
    }
}
