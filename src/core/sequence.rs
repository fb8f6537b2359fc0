//! Command definitions and ordered command sequences

use crate::command::{Command, CommandError, CommandKind};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Parameters of a command invocation, keyed by wire name
pub type Params = Map<String, Value>;

/// Variables passed to a function call
pub type Vars = BTreeMap<String, String>;

/// What a definition runs: a command or a named function, never both
#[derive(Debug, Clone, PartialEq)]
pub enum CommandTarget {
    Command { name: String, params: Params },
    Function { name: String, vars: Option<Vars> },
}

/// How a failing command is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionType {
    Test,
    Setup,
    System,
}

impl ExecutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionType::Test => "test",
            ExecutionType::Setup => "setup",
            ExecutionType::System => "system",
        }
    }
}

/// A wire-ready command: a resolved invocation or a function reference
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDefinition {
    pub target: CommandTarget,
    pub execution_type: Option<ExecutionType>,
    pub display_name: String,
    pub run_variants: Vec<String>,
    pub timeout_secs: u32,
}

impl CommandDefinition {
    fn with_target(target: CommandTarget) -> Self {
        Self {
            target,
            execution_type: None,
            display_name: String::new(),
            run_variants: Vec::new(),
            timeout_secs: 0,
        }
    }

    /// An invocation of the named command with no parameters
    pub fn command(name: impl Into<String>) -> Self {
        Self::with_target(CommandTarget::Command {
            name: name.into(),
            params: Params::new(),
        })
    }

    /// A call to the named function
    pub fn function(name: impl Into<String>) -> Self {
        Self::function_with_vars(name, None)
    }

    /// A call to the named function; `None` vars stay `None`
    pub fn function_with_vars(name: impl Into<String>, vars: Option<Vars>) -> Self {
        Self::with_target(CommandTarget::Function {
            name: name.into(),
            vars,
        })
    }

    pub fn command_name(&self) -> Option<&str> {
        match &self.target {
            CommandTarget::Command { name, .. } => Some(name.as_str()),
            CommandTarget::Function { .. } => None,
        }
    }

    pub fn function_name(&self) -> Option<&str> {
        match &self.target {
            CommandTarget::Function { name, .. } => Some(name.as_str()),
            CommandTarget::Command { .. } => None,
        }
    }

    pub fn params(&self) -> Option<&Params> {
        match &self.target {
            CommandTarget::Command { params, .. } => Some(params),
            CommandTarget::Function { .. } => None,
        }
    }

    pub fn vars(&self) -> Option<&Vars> {
        match &self.target {
            CommandTarget::Function { vars, .. } => vars.as_ref(),
            CommandTarget::Command { .. } => None,
        }
    }

    /// Rename the command or function this definition targets
    pub fn name(&mut self, id: impl Into<String>) -> &mut Self {
        match &mut self.target {
            CommandTarget::Command { name, .. } | CommandTarget::Function { name, .. } => {
                *name = id.into();
            }
        }
        self
    }

    pub fn display_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.display_name = name.into();
        self
    }

    pub fn execution_type(&mut self, kind: ExecutionType) -> &mut Self {
        self.execution_type = Some(kind);
        self
    }

    /// Restrict the command to the given build variants
    pub fn variants<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run_variants.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn timeout(&mut self, secs: u32) -> &mut Self {
        self.timeout_secs = secs;
        self
    }

    /// Set one parameter; no-op on a function reference
    pub fn param(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        if let CommandTarget::Command { params, .. } = &mut self.target {
            params.insert(key.into(), value.into());
        }
        self
    }

    /// Merge parameters, overwriting existing keys; no-op on a function reference
    pub fn extend_params(&mut self, extra: Params) -> &mut Self {
        if let CommandTarget::Command { params, .. } = &mut self.target {
            params.extend(extra);
        }
        self
    }

    /// Replace all parameters; no-op on a function reference
    pub fn replace_params(&mut self, replacement: Params) -> &mut Self {
        if let CommandTarget::Command { params, .. } = &mut self.target {
            *params = replacement;
        }
        self
    }

    /// Set one variable; no-op on a command invocation
    pub fn var(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        if let CommandTarget::Function { vars, .. } = &mut self.target {
            vars.get_or_insert_with(Vars::new)
                .insert(key.into(), value.into());
        }
        self
    }

    /// Replace all variables; no-op on a command invocation
    pub fn replace_vars(&mut self, replacement: Option<Vars>) -> &mut Self {
        if let CommandTarget::Function { vars, .. } = &mut self.target {
            *vars = replacement;
        }
        self
    }
}

/// Ordered, append-only list of command definitions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandSequence(Vec<CommandDefinition>);

impl CommandSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CommandDefinition> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommandDefinition> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[CommandDefinition] {
        &self.0
    }

    /// Validate and append one command
    pub fn add(&mut self, command: impl Into<Command>) -> Result<&mut Self, CommandError> {
        self.extend(std::iter::once(command.into()))
    }

    /// Validate and append commands in order
    ///
    /// Every command is resolved before any is appended: when one fails
    /// the sequence is left as it was.
    pub fn extend<I>(&mut self, commands: I) -> Result<&mut Self, CommandError>
    where
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        let resolved = commands
            .into_iter()
            .map(|c| Into::<Command>::into(c).resolve())
            .collect::<Result<Vec<_>, _>>()?;

        if !resolved.is_empty() {
            debug!(count = resolved.len(), "appending commands");
        }
        self.0.extend(resolved);
        Ok(self)
    }

    /// Append a call to the named function
    pub fn function(&mut self, name: impl Into<String>) -> &mut Self {
        self.0.push(CommandDefinition::function(name));
        self
    }

    /// Append a call to the named function with variables
    pub fn function_with_vars(&mut self, name: impl Into<String>, vars: Option<Vars>) -> &mut Self {
        self.0.push(CommandDefinition::function_with_vars(name, vars));
        self
    }

    /// Append already-built definitions
    pub fn append<I>(&mut self, definitions: I) -> &mut Self
    where
        I: IntoIterator<Item = CommandDefinition>,
    {
        self.0.extend(definitions);
        self
    }

    /// Append an empty command invocation to fill in by hand
    pub fn new_command(&mut self) -> &mut CommandDefinition {
        let index = self.0.len();
        self.0.push(CommandDefinition::command(""));
        &mut self.0[index]
    }
}

impl<'a> IntoIterator for &'a CommandSequence {
    type Item = &'a CommandDefinition;
    type IntoIter = std::slice::Iter<'a, CommandDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for CommandSequence {
    type Output = CommandDefinition;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
