//! Build variant model
//!
//! A variant selects which tasks run and where. Tri-state flags are
//! `Option<bool>`: `None` leaves the service default in place, while
//! `Some(false)` is an explicit override that is still emitted.

use crate::core::task::{TaskDependency, TaskGroup};
use serde_json::Value;
use std::collections::BTreeMap;

/// Expansions available to every task in a variant
pub type Expansions = BTreeMap<String, Value>;

/// Groups execution tasks under a single displayed task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayTaskDefinition {
    pub name: String,
    pub components: Vec<String>,
}

impl DisplayTaskDefinition {
    pub fn new<I, S>(name: impl Into<String>, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }
}

/// Report a task's outcome as a repository check run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckRun {
    pub path_to_outputs: String,
}

impl CheckRun {
    pub fn set_path_to_outputs(&mut self, path: impl Into<String>) -> &mut Self {
        self.path_to_outputs = path.into();
        self
    }
}

/// A variant's reference to a task, with per-variant overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSpec {
    /// Name of the task, or of a task group
    pub name: String,

    /// Rerun earlier commits when this task fails
    pub stepback: bool,

    /// Distros the task may run on
    pub distro: Vec<String>,

    /// Distros that override the variant's `run_on` for this task
    pub run_on: Vec<String>,

    pub depends_on: Vec<TaskDependency>,

    /// Scheduling priority; zero keeps the task's own
    pub priority: i64,

    /// Maximum run time; zero keeps the service default
    pub exec_timeout_secs: u32,

    /// Activation interval; zero keeps the variant's
    pub batchtime: u32,

    /// Cron expression; replaces `batchtime` when set
    pub cron_batchtime: String,

    pub activate: Option<bool>,
    pub disable: Option<bool>,
    pub patchable: Option<bool>,
    pub patch_only: Option<bool>,
    pub allow_for_git_tag: Option<bool>,
    pub git_tag_only: Option<bool>,
    pub allowed_requesters: Vec<String>,
    pub task_group: Option<Box<TaskGroup>>,
    pub create_check_run: Option<CheckRun>,
}

impl TaskSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_stepback(&mut self, stepback: bool) -> &mut Self {
        self.stepback = stepback;
        self
    }

    pub fn set_distros(&mut self, distros: Vec<String>) -> &mut Self {
        self.distro = distros;
        self
    }

    /// Replace the run-on list with a single distro
    pub fn set_run_on(&mut self, distro: impl Into<String>) -> &mut Self {
        self.run_on = vec![distro.into()];
        self
    }

    pub fn set_depends_on<I>(&mut self, deps: I) -> &mut Self
    where
        I: IntoIterator<Item = TaskDependency>,
    {
        self.depends_on.extend(deps);
        self
    }

    pub fn set_priority(&mut self, priority: i64) -> &mut Self {
        self.priority = priority;
        self
    }

    pub fn set_exec_timeout_secs(&mut self, secs: u32) -> &mut Self {
        self.exec_timeout_secs = secs;
        self
    }

    pub fn set_batchtime(&mut self, batchtime: u32) -> &mut Self {
        self.batchtime = batchtime;
        self
    }

    pub fn set_cron_batchtime(&mut self, cron: impl Into<String>) -> &mut Self {
        self.cron_batchtime = cron.into();
        self
    }

    pub fn set_activate(&mut self, val: Option<bool>) -> &mut Self {
        self.activate = val;
        self
    }

    pub fn set_disable(&mut self, val: Option<bool>) -> &mut Self {
        self.disable = val;
        self
    }

    pub fn set_patchable(&mut self, val: Option<bool>) -> &mut Self {
        self.patchable = val;
        self
    }

    pub fn set_patch_only(&mut self, val: Option<bool>) -> &mut Self {
        self.patch_only = val;
        self
    }

    pub fn set_allow_for_git_tag(&mut self, val: Option<bool>) -> &mut Self {
        self.allow_for_git_tag = val;
        self
    }

    pub fn set_git_tag_only(&mut self, val: Option<bool>) -> &mut Self {
        self.git_tag_only = val;
        self
    }

    pub fn allowed_requester(&mut self, requester: impl Into<String>) -> &mut Self {
        self.allowed_requesters.push(requester.into());
        self
    }

    /// Embed a task group in place of a plain task reference
    pub fn set_task_group(&mut self, group: TaskGroup) -> &mut Self {
        self.task_group = Some(Box::new(group));
        self
    }

    pub fn set_create_check_run(&mut self, check_run: CheckRun) -> &mut Self {
        self.create_check_run = Some(check_run);
        self
    }
}

/// A named execution environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variant {
    /// Unique variant identifier
    pub build_name: String,

    /// Human-readable name shown by the service
    pub build_display_name: String,

    /// Activation interval for new commits; zero keeps the project default
    pub batch_time_secs: u32,

    /// Cron expression; replaces `batch_time_secs` when set
    pub cron_batch_time: String,

    pub stepback: Option<bool>,
    pub activate: Option<bool>,
    pub disable: Option<bool>,
    pub patchable: Option<bool>,
    pub patch_only: Option<bool>,
    pub allow_for_git_tag: Option<bool>,
    pub git_tag_only: Option<bool>,

    /// Tasks the variant runs
    pub task_specs: Vec<TaskSpec>,

    /// Distros every task runs on unless a task spec overrides them
    pub distro_run_on: Vec<String>,

    /// Project modules checked out alongside the source
    pub modules: Vec<String>,

    /// `None` and an empty map both encode to nothing, but stay distinct here
    pub expansions: Option<Expansions>,
    pub display_task_specs: Vec<DisplayTaskDefinition>,
    pub allowed_requesters: Vec<String>,
    pub depends_on: Vec<TaskDependency>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            build_name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&mut self, id: impl Into<String>) -> &mut Self {
        self.build_name = id.into();
        self
    }

    pub fn display_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.build_display_name = name.into();
        self
    }

    pub fn batch_time(&mut self, secs: u32) -> &mut Self {
        self.batch_time_secs = secs;
        self
    }

    pub fn set_cron_batch_time(&mut self, cron: impl Into<String>) -> &mut Self {
        self.cron_batch_time = cron.into();
        self
    }

    pub fn set_stepback(&mut self, val: Option<bool>) -> &mut Self {
        self.stepback = val;
        self
    }

    pub fn set_activate(&mut self, val: Option<bool>) -> &mut Self {
        self.activate = val;
        self
    }

    pub fn set_disable(&mut self, val: Option<bool>) -> &mut Self {
        self.disable = val;
        self
    }

    pub fn set_patchable(&mut self, val: Option<bool>) -> &mut Self {
        self.patchable = val;
        self
    }

    pub fn set_patch_only(&mut self, val: Option<bool>) -> &mut Self {
        self.patch_only = val;
        self
    }

    pub fn set_allow_for_git_tag(&mut self, val: Option<bool>) -> &mut Self {
        self.allow_for_git_tag = val;
        self
    }

    pub fn set_git_tag_only(&mut self, val: Option<bool>) -> &mut Self {
        self.git_tag_only = val;
        self
    }

    /// Replace the run-on list with a single distro
    pub fn run_on(&mut self, distro: impl Into<String>) -> &mut Self {
        self.distro_run_on = vec![distro.into()];
        self
    }

    pub fn task_spec(&mut self, spec: TaskSpec) -> &mut Self {
        self.task_specs.push(spec);
        self
    }

    /// Add a plain task spec per name, skipping empty names
    pub fn add_tasks<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if name.is_empty() {
                continue;
            }
            self.task_specs.push(TaskSpec::new(name));
        }
        self
    }

    pub fn set_expansions(&mut self, expansions: Option<Expansions>) -> &mut Self {
        self.expansions = expansions;
        self
    }

    pub fn expansion(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.expansions
            .get_or_insert_with(Expansions::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn display_tasks<I>(&mut self, defs: I) -> &mut Self
    where
        I: IntoIterator<Item = DisplayTaskDefinition>,
    {
        self.display_task_specs.extend(defs);
        self
    }

    pub fn allowed_requester(&mut self, requester: impl Into<String>) -> &mut Self {
        self.allowed_requesters.push(requester.into());
        self
    }

    pub fn module(&mut self, module: impl Into<String>) -> &mut Self {
        self.modules.push(module.into());
        self
    }

    pub fn set_depends_on<I>(&mut self, deps: I) -> &mut Self
    where
        I: IntoIterator<Item = TaskDependency>,
    {
        self.depends_on.extend(deps);
        self
    }
}
