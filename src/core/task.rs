//! Task and task group models

use crate::command::{Command, CommandError};
use crate::core::sequence::{CommandDefinition, CommandSequence, Vars};

/// Dependency on a task, optionally in another build variant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDependency {
    pub name: String,
    pub variant: String,
}

impl TaskDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: String::new(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_variant(&mut self, variant: impl Into<String>) -> &mut Self {
        self.variant = variant.into();
        self
    }
}

/// A named unit of work
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Task {
    /// Unique task name
    pub name: String,

    /// Scheduling priority; zero keeps the service default
    pub priority_override: i64,

    /// Tasks that must finish before this one starts
    pub dependencies: Vec<TaskDependency>,

    /// Commands run in order
    pub commands: CommandSequence,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validate and append commands
    pub fn command<I>(&mut self, commands: I) -> Result<&mut Self, CommandError>
    where
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        self.commands.extend(commands)?;
        Ok(self)
    }

    /// Append an empty command invocation to fill in by hand
    pub fn add_command(&mut self) -> &mut CommandDefinition {
        self.commands.new_command()
    }

    /// Append an already-built definition
    pub fn add_definition(&mut self, definition: CommandDefinition) -> &mut Self {
        self.commands.append(std::iter::once(definition));
        self
    }

    pub fn dependency<I>(&mut self, deps: I) -> &mut Self
    where
        I: IntoIterator<Item = TaskDependency>,
    {
        self.dependencies.extend(deps);
        self
    }

    /// Append one function call per name
    pub fn function<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.commands.function(name);
        }
        self
    }

    pub fn function_with_vars(&mut self, name: impl Into<String>, vars: Option<Vars>) -> &mut Self {
        self.commands.function_with_vars(name, vars);
        self
    }

    pub fn priority(&mut self, priority: i64) -> &mut Self {
        self.priority_override = priority;
        self
    }
}

/// Tasks that share hosts and setup/teardown commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskGroup {
    pub group_name: String,

    /// Hosts the group may run on at once; zero keeps the service default
    pub max_hosts: u32,

    /// Leave processes started by one task running for the next
    pub share_processes: bool,

    /// A failing setup-group command fails the task instead of being ignored
    pub setup_group_can_fail_task: bool,

    pub setup_group_timeout_secs: u32,

    /// Run once per host before the first task
    pub setup_group_cmds: CommandSequence,

    /// Run before each task
    pub setup_task_cmds: CommandSequence,

    /// Run after each task
    pub teardown_task_cmds: CommandSequence,

    /// Run once per host after the last task
    pub teardown_group_cmds: CommandSequence,

    /// Run when a task times out
    pub timeout_cmds: CommandSequence,

    /// Member task names, in execution order
    pub tasks: Vec<String>,

    pub tags: Vec<String>,
}

impl TaskGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            group_name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&mut self, id: impl Into<String>) -> &mut Self {
        self.group_name = id.into();
        self
    }

    pub fn set_max_hosts(&mut self, num: u32) -> &mut Self {
        self.max_hosts = num;
        self
    }

    pub fn set_share_processes(&mut self, val: bool) -> &mut Self {
        self.share_processes = val;
        self
    }

    pub fn set_setup_group_can_fail_task(&mut self, val: bool) -> &mut Self {
        self.setup_group_can_fail_task = val;
        self
    }

    pub fn set_setup_group_timeout_secs(&mut self, secs: u32) -> &mut Self {
        self.setup_group_timeout_secs = secs;
        self
    }

    pub fn setup_group<I>(&mut self, commands: I) -> Result<&mut Self, CommandError>
    where
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        self.setup_group_cmds.extend(commands)?;
        Ok(self)
    }

    pub fn setup_task<I>(&mut self, commands: I) -> Result<&mut Self, CommandError>
    where
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        self.setup_task_cmds.extend(commands)?;
        Ok(self)
    }

    pub fn teardown_task<I>(&mut self, commands: I) -> Result<&mut Self, CommandError>
    where
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        self.teardown_task_cmds.extend(commands)?;
        Ok(self)
    }

    pub fn teardown_group<I>(&mut self, commands: I) -> Result<&mut Self, CommandError>
    where
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        self.teardown_group_cmds.extend(commands)?;
        Ok(self)
    }

    pub fn timeout<I>(&mut self, commands: I) -> Result<&mut Self, CommandError>
    where
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        self.timeout_cmds.extend(commands)?;
        Ok(self)
    }

    /// Add member tasks by name
    pub fn task<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tasks.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn tag<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}
