//! Project configuration registry
//!
//! [`Configuration`] owns every function, task, task group and variant of a
//! project. Entities are looked up by name and created on first use, so
//! asking twice for the same name always yields the same stored entity.

use crate::command::CommandError;
use crate::core::sequence::CommandSequence;
use crate::core::task::{Task, TaskGroup};
use crate::core::variant::Variant;
use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::{debug, warn};

/// Top-level project configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    /// Reusable command sequences, keyed by function name
    pub functions: BTreeMap<String, CommandSequence>,

    pub tasks: Vec<Task>,

    pub groups: Vec<TaskGroup>,

    pub variants: Vec<Variant>,
}

impl Configuration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the task with this name, creating it if needed
    pub fn task(&mut self, name: &str) -> &mut Task {
        let index = match self.tasks.iter().position(|t| t.name == name) {
            Some(index) => index,
            None => {
                debug!(task = name, "creating task");
                self.tasks.push(Task::new(name));
                self.tasks.len() - 1
            }
        };
        &mut self.tasks[index]
    }

    /// Get the task group with this name, creating it if needed
    pub fn task_group(&mut self, name: &str) -> &mut TaskGroup {
        let index = match self.groups.iter().position(|g| g.group_name == name) {
            Some(index) => index,
            None => {
                debug!(task_group = name, "creating task group");
                self.groups.push(TaskGroup::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    /// Get the function with this name, creating an empty one if needed
    pub fn function(&mut self, name: &str) -> &mut CommandSequence {
        self.functions.entry(name.to_string()).or_insert_with(|| {
            debug!(function = name, "creating function");
            CommandSequence::new()
        })
    }

    /// Get the build variant with this name, creating it if needed
    pub fn variant(&mut self, name: &str) -> &mut Variant {
        let index = match self.variants.iter().position(|v| v.build_name == name) {
            Some(index) => index,
            None => {
                debug!(variant = name, "creating variant");
                self.variants.push(Variant::new(name));
                self.variants.len() - 1
            }
        };
        &mut self.variants[index]
    }

    pub fn find_task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn find_task_group(&self, name: &str) -> Option<&TaskGroup> {
        self.groups.iter().find(|g| g.group_name == name)
    }

    pub fn find_function(&self, name: &str) -> Option<&CommandSequence> {
        self.functions.get(name)
    }

    pub fn find_variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.build_name == name)
    }
}

/// Run a construction routine against a fresh configuration
///
/// Any error the routine returns, and any panic it raises, is reported as
/// an error instead of the configuration.
pub fn build_configuration<F>(f: F) -> Result<Configuration>
where
    F: FnOnce(&mut Configuration) -> Result<()>,
{
    let mut config = Configuration::new();

    match panic::catch_unwind(AssertUnwindSafe(|| f(&mut config))) {
        Ok(Ok(())) => Ok(config),
        Ok(Err(e)) => Err(e.context("Failed to build configuration")),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!(panic = %message, "configuration routine panicked");
            anyhow::bail!("Configuration routine panicked: {}", message)
        }
    }
}

/// Kind of entity a command was attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Function,
    Task,
    TaskGroup,
    Variant,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Function => "function",
            EntityKind::Task => "task",
            EntityKind::TaskGroup => "task group",
            EntityKind::Variant => "variant",
        };
        f.write_str(label)
    }
}

/// First failure recorded by a [`ConfigurationBuilder`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid command in {kind} '{name}': {source}")]
pub struct BuildError {
    pub kind: EntityKind,
    pub name: String,
    pub source: CommandError,
}

/// Builds a configuration, stopping at the first invalid command
///
/// Each step receives the named entity; once a step fails every later step
/// is skipped and [`finalize`](Self::finalize) returns that failure.
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    config: Configuration,
    error: Option<BuildError>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(&mut CommandSequence) -> Result<(), CommandError>,
    {
        if self.error.is_none() {
            let result = f(self.config.function(name));
            self.record(EntityKind::Function, name, result);
        }
        self
    }

    pub fn task<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(&mut Task) -> Result<(), CommandError>,
    {
        if self.error.is_none() {
            let result = f(self.config.task(name));
            self.record(EntityKind::Task, name, result);
        }
        self
    }

    pub fn task_group<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(&mut TaskGroup) -> Result<(), CommandError>,
    {
        if self.error.is_none() {
            let result = f(self.config.task_group(name));
            self.record(EntityKind::TaskGroup, name, result);
        }
        self
    }

    pub fn variant<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(&mut Variant) -> Result<(), CommandError>,
    {
        if self.error.is_none() {
            let result = f(self.config.variant(name));
            self.record(EntityKind::Variant, name, result);
        }
        self
    }

    fn record(&mut self, kind: EntityKind, name: &str, result: Result<(), CommandError>) {
        if let Err(source) = result {
            warn!(%kind, name, error = %source, "stopping configuration build");
            self.error = Some(BuildError {
                kind,
                name: name.to_string(),
                source,
            });
        }
    }

    /// The finished configuration, or the first failure
    pub fn finalize(self) -> Result<Configuration, BuildError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.config),
        }
    }
}
