//! Field tables and document conversion for every configuration entity

use crate::core::config::Configuration;
use crate::core::sequence::{CommandDefinition, CommandSequence, CommandTarget};
use crate::core::task::{Task, TaskDependency, TaskGroup};
use crate::core::variant::{CheckRun, DisplayTaskDefinition, TaskSpec, Variant};
use crate::document::{Field, Mapping, Schema};
use serde_json::Value;

/// Conversion into a schema-specific document tree
pub trait ToDocument {
    fn to_document(&self, schema: Schema) -> Value;
}

mod fields {
    use crate::document::Field;

    pub const NAME: Field = Field::same("name");

    // configuration
    pub const FUNCTIONS: Field = Field::same("functions");
    pub const TASKS: Field = Field::same("tasks");
    pub const TASK_GROUPS: Field = Field::same("task_groups");
    pub const BUILD_VARIANTS: Field = Field::same("buildvariants");

    // command definition
    pub const FUNC: Field = Field::same("func");
    pub const TYPE: Field = Field::same("type");
    pub const DISPLAY_NAME: Field = Field::same("display_name");
    pub const COMMAND: Field = Field::same("command");
    pub const VARIANTS: Field = Field::same("variants");
    pub const TIMEOUT_SECS: Field = Field::same("timeout_secs");
    pub const PARAMS: Field = Field::same("params");
    pub const VARS: Field = Field::same("vars");

    // task
    pub const PRIORITY_OVERRIDE: Field = Field::renamed("priority", "priority_override");
    pub const DEPENDENCIES: Field = Field::renamed("depends_on", "dependencies");
    pub const COMMANDS: Field = Field::same("commands");
    pub const VARIANT: Field = Field::same("variant");

    // task group
    pub const MAX_HOSTS: Field = Field::same("max_hosts");
    pub const SHARE_PROCESSES: Field = Field::same("share_processes");
    pub const SETUP_GROUP: Field = Field::same("setup_group");
    pub const SETUP_GROUP_CAN_FAIL_TASK: Field = Field::same("setup_group_can_fail_task");
    pub const SETUP_GROUP_TIMEOUT_SECS: Field = Field::same("setup_group_timeout_secs");
    pub const SETUP_TASK: Field = Field::same("setup_task");
    pub const TEARDOWN_TASK: Field = Field::same("teardown_task");
    pub const TEARDOWN_GROUP: Field = Field::same("teardown_group");
    pub const TIMEOUT: Field = Field::same("timeout");
    pub const TAGS: Field = Field::same("tags");

    // variant and task spec
    pub const BATCHTIME: Field = Field::same("batchtime");
    pub const CRON: Field = Field::same("cron");
    pub const STEPBACK: Field = Field::same("stepback");
    pub const ACTIVATE: Field = Field::same("activate");
    pub const DISABLE: Field = Field::same("disable");
    pub const PATCHABLE: Field = Field::same("patchable");
    pub const PATCH_ONLY: Field = Field::same("patch_only");
    pub const ALLOW_FOR_GIT_TAG: Field = Field::same("allow_for_git_tag");
    pub const GIT_TAG_ONLY: Field = Field::same("git_tag_only");
    pub const RUN_ON: Field = Field::same("run_on");
    pub const MODULES: Field = Field::same("modules");
    pub const EXPANSIONS: Field = Field::same("expansions");
    pub const DISPLAY_TASKS: Field = Field::same("display_tasks");
    pub const EXECUTION_TASKS: Field = Field::same("execution_tasks");
    pub const ALLOWED_REQUESTERS: Field = Field::same("allowed_requesters");
    pub const DEPENDS_ON: Field = Field::same("depends_on");
    pub const DISTROS: Field = Field::renamed("distros", "distro");
    pub const PRIORITY: Field = Field::same("priority");
    pub const EXEC_TIMEOUT_SECS: Field = Field::same("exec_timeout_secs");
    pub const TASK_GROUP: Field = Field::same("task_group");
    pub const CREATE_CHECK_RUN: Field = Field::same("create_check_run");
    pub const PATH_TO_OUTPUTS: Field = Field::same("path_to_outputs");
}

use fields::*;

fn documents<'a, T, I>(items: I, schema: Schema) -> Vec<Value>
where
    T: ToDocument + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(|i| i.to_document(schema)).collect()
}

/// Shorthand for resolving a field under the current schema
struct Keys(Schema);

impl Keys {
    fn of(&self, field: Field) -> &'static str {
        field.key(self.0)
    }
}

impl ToDocument for CommandDefinition {
    fn to_document(&self, schema: Schema) -> Value {
        let k = Keys(schema);
        let mapping = match &self.target {
            CommandTarget::Command { name, params } => Mapping::new()
                .required_text(k.of(COMMAND), name)
                .object(k.of(PARAMS), params),
            CommandTarget::Function { name, vars } => {
                let mapping = Mapping::new().required_text(k.of(FUNC), name);
                match vars {
                    Some(vars) => mapping.strings(k.of(VARS), vars),
                    None => mapping,
                }
            }
        };

        mapping
            .text(
                k.of(TYPE),
                self.execution_type.map(|t| t.as_str()).unwrap_or_default(),
            )
            .text(k.of(DISPLAY_NAME), &self.display_name)
            .list(k.of(VARIANTS), &self.run_variants)
            .number(k.of(TIMEOUT_SECS), self.timeout_secs)
            .into_value()
    }
}

impl ToDocument for CommandSequence {
    fn to_document(&self, schema: Schema) -> Value {
        Value::Array(documents(self, schema))
    }
}

impl ToDocument for TaskDependency {
    fn to_document(&self, schema: Schema) -> Value {
        let k = Keys(schema);
        Mapping::new()
            .required_text(k.of(NAME), &self.name)
            .required_text(k.of(VARIANT), &self.variant)
            .into_value()
    }
}

impl ToDocument for Task {
    fn to_document(&self, schema: Schema) -> Value {
        let k = Keys(schema);
        Mapping::new()
            .required_text(k.of(NAME), &self.name)
            .number(k.of(PRIORITY_OVERRIDE), self.priority_override)
            .entries(k.of(DEPENDENCIES), documents(&self.dependencies, schema))
            .required_entries(k.of(COMMANDS), documents(&self.commands, schema))
            .into_value()
    }
}

impl ToDocument for TaskGroup {
    fn to_document(&self, schema: Schema) -> Value {
        let k = Keys(schema);
        Mapping::new()
            .required_text(k.of(NAME), &self.group_name)
            .number(k.of(MAX_HOSTS), self.max_hosts)
            .flag(k.of(SHARE_PROCESSES), self.share_processes)
            .entries(k.of(SETUP_GROUP), documents(&self.setup_group_cmds, schema))
            .flag(k.of(SETUP_GROUP_CAN_FAIL_TASK), self.setup_group_can_fail_task)
            .number(k.of(SETUP_GROUP_TIMEOUT_SECS), self.setup_group_timeout_secs)
            .entries(k.of(SETUP_TASK), documents(&self.setup_task_cmds, schema))
            .required_list(k.of(TASKS), &self.tasks)
            .entries(k.of(TEARDOWN_TASK), documents(&self.teardown_task_cmds, schema))
            .entries(k.of(TEARDOWN_GROUP), documents(&self.teardown_group_cmds, schema))
            .entries(k.of(TIMEOUT), documents(&self.timeout_cmds, schema))
            .list(k.of(TAGS), &self.tags)
            .into_value()
    }
}

impl ToDocument for DisplayTaskDefinition {
    fn to_document(&self, schema: Schema) -> Value {
        let k = Keys(schema);
        Mapping::new()
            .required_text(k.of(NAME), &self.name)
            .required_list(k.of(EXECUTION_TASKS), &self.components)
            .into_value()
    }
}

impl CheckRun {
    fn to_mapping(&self, schema: Schema) -> Mapping {
        Mapping::new().text(PATH_TO_OUTPUTS.key(schema), &self.path_to_outputs)
    }
}

impl ToDocument for CheckRun {
    fn to_document(&self, schema: Schema) -> Value {
        self.to_mapping(schema).into_value()
    }
}

impl ToDocument for TaskSpec {
    fn to_document(&self, schema: Schema) -> Value {
        let k = Keys(schema);
        Mapping::new()
            .required_text(k.of(NAME), &self.name)
            .flag(k.of(STEPBACK), self.stepback)
            .list(k.of(DISTROS), &self.distro)
            .list(k.of(RUN_ON), &self.run_on)
            .entries(k.of(DEPENDS_ON), documents(&self.depends_on, schema))
            .number(k.of(PRIORITY), self.priority)
            .number(k.of(EXEC_TIMEOUT_SECS), self.exec_timeout_secs)
            .number(k.of(BATCHTIME), self.batchtime)
            .text(k.of(CRON), &self.cron_batchtime)
            .tristate(k.of(ACTIVATE), self.activate)
            .tristate(k.of(DISABLE), self.disable)
            .tristate(k.of(PATCHABLE), self.patchable)
            .tristate(k.of(PATCH_ONLY), self.patch_only)
            .tristate(k.of(ALLOW_FOR_GIT_TAG), self.allow_for_git_tag)
            .tristate(k.of(GIT_TAG_ONLY), self.git_tag_only)
            .list(k.of(ALLOWED_REQUESTERS), &self.allowed_requesters)
            .document(
                k.of(TASK_GROUP),
                self.task_group.as_ref().map(|g| g.to_document(schema)),
            )
            .nested(
                k.of(CREATE_CHECK_RUN),
                self.create_check_run.as_ref().map(|c| c.to_mapping(schema)),
            )
            .into_value()
    }
}

impl ToDocument for Variant {
    fn to_document(&self, schema: Schema) -> Value {
        let k = Keys(schema);
        Mapping::new()
            .text(k.of(NAME), &self.build_name)
            .text(k.of(DISPLAY_NAME), &self.build_display_name)
            .number(k.of(BATCHTIME), self.batch_time_secs)
            .text(k.of(CRON), &self.cron_batch_time)
            .tristate(k.of(STEPBACK), self.stepback)
            .tristate(k.of(ACTIVATE), self.activate)
            .tristate(k.of(DISABLE), self.disable)
            .tristate(k.of(PATCHABLE), self.patchable)
            .tristate(k.of(PATCH_ONLY), self.patch_only)
            .tristate(k.of(ALLOW_FOR_GIT_TAG), self.allow_for_git_tag)
            .tristate(k.of(GIT_TAG_ONLY), self.git_tag_only)
            .entries(k.of(TASKS), documents(&self.task_specs, schema))
            .list(k.of(RUN_ON), &self.distro_run_on)
            .list(k.of(MODULES), &self.modules)
            .values(k.of(EXPANSIONS), self.expansions.as_ref())
            .entries(k.of(DISPLAY_TASKS), documents(&self.display_task_specs, schema))
            .list(k.of(ALLOWED_REQUESTERS), &self.allowed_requesters)
            .entries(k.of(DEPENDS_ON), documents(&self.depends_on, schema))
            .into_value()
    }
}

impl ToDocument for Configuration {
    fn to_document(&self, schema: Schema) -> Value {
        let k = Keys(schema);
        let functions = self
            .functions
            .iter()
            .map(|(name, seq)| (name.clone(), seq.to_document(schema)))
            .collect::<std::collections::BTreeMap<_, _>>();

        Mapping::new()
            .values(k.of(FUNCTIONS), Some(&functions))
            .entries(k.of(TASKS), documents(&self.tasks, schema))
            .entries(k.of(TASK_GROUPS), documents(&self.groups, schema))
            .entries(k.of(BUILD_VARIANTS), documents(&self.variants, schema))
            .into_value()
    }
}

impl Configuration {
    /// Render as JSON under the interchange schema
    pub fn to_json(&self) -> Result<String, super::EncodeError> {
        super::to_json(self)
    }

    /// Render as YAML under the authored schema
    pub fn to_yaml(&self) -> Result<String, super::EncodeError> {
        super::to_yaml(self)
    }
}
