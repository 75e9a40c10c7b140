#![allow(dead_code)]

use critpath::config::{ConfigSection, PlanFile, RawPlanFile};
use critpath::hierarchy::CollapseState;
use critpath::model::Task;
use critpath::types::ScheduleStrategy;

/// Builder for `Task` to keep test setup short.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            task: Task::new(id, "", ""),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.task.name = name.to_string();
        self
    }

    pub fn span(mut self, start: &str, end: &str) -> Self {
        self.task.start = start.to_string();
        self.task.end = end.to_string();
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.dependencies.insert(dep);
        self
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.task.parent_id = Some(parent.to_string());
        self
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.task.progress = progress;
        self
    }

    pub fn extra(mut self, key: &str, value: serde_json::Value) -> Self {
        self.task.extra.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for `PlanFile`.
pub struct PlanBuilder {
    plan: RawPlanFile,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self {
            plan: RawPlanFile {
                config: ConfigSection::default(),
                collapsed: CollapseState::new(),
                task: Vec::new(),
            },
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.plan.task.push(task);
        self
    }

    pub fn collapsed(mut self, id: &str) -> Self {
        self.plan.collapsed.insert(id.to_string(), true);
        self
    }

    pub fn strategy(mut self, strategy: ScheduleStrategy) -> Self {
        self.plan.config.strategy = strategy;
        self
    }

    pub fn rollup_on_load(mut self, val: bool) -> Self {
        self.plan.config.rollup_on_load = val;
        self
    }

    pub fn build_raw(self) -> RawPlanFile {
        self.plan
    }

    pub fn build(self) -> PlanFile {
        PlanFile::try_from(self.plan).expect("Failed to build valid plan from builder")
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Day `n` of a fixed reference calendar (day 0 is 2024-01-01).
pub fn day(n: i64) -> String {
    critpath::dates::add_days("2024-01-01", n)
}

/// A task starting on day `start` lasting `duration` days.
pub fn task_on(id: &str, start: i64, duration: i64) -> TaskBuilder {
    TaskBuilder::new(id).span(&day(start), &day(start + duration - 1))
}
