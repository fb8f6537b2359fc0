//! Process, shell and scripting-harness execution commands

use crate::command::{CommandError, CommandKind};
use crate::core::sequence::Params;
use crate::document::Mapping;
use std::collections::BTreeMap;

pub(crate) const EXEC: &str = "subprocess.exec";
pub(crate) const SHELL_EXEC: &str = "shell.exec";
pub(crate) const SUBPROCESS_SCRIPTING: &str = "subprocess.scripting";

/// Run a binary or command line directly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exec {
    /// Start the process and move on without waiting for it
    pub background: bool,

    /// Suppress the command's output in the task log
    pub silent: bool,

    /// A non-zero exit does not fail the task
    pub continue_on_error: bool,

    /// Send output to the system log instead of the task log
    pub system_log: bool,

    /// Merge standard error into standard output
    pub combine_output: bool,

    pub ignore_std_error: bool,

    pub ignore_std_out: bool,

    /// Pass empty strings in `args` through instead of dropping them
    pub keep_empty_args: bool,

    pub working_directory: String,

    /// Full command line, as an alternative to `binary` with `args`
    pub command: String,

    /// Executable to run with `args`
    pub binary: String,

    pub args: Vec<String>,

    /// Extra environment variables
    pub env: BTreeMap<String, String>,
}

impl CommandKind for Exec {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(EXEC)
    }

    fn params(&self) -> Params {
        Mapping::new()
            .flag("background", self.background)
            .flag("silent", self.silent)
            .flag("continue_on_err", self.continue_on_error)
            .flag("system_log", self.system_log)
            .flag("redirect_standard_error_to_output", self.combine_output)
            .flag("ignore_standard_error", self.ignore_std_error)
            .flag("ignore_standard_out", self.ignore_std_out)
            .flag("keep_empty_args", self.keep_empty_args)
            .text("working_dir", &self.working_directory)
            .text("command", &self.command)
            .text("binary", &self.binary)
            .list("args", &self.args)
            .strings("env", &self.env)
            .into_map()
    }
}

/// Run a script through the shell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellExec {
    pub background: bool,
    pub silent: bool,
    pub continue_on_error: bool,
    pub system_log: bool,
    pub combine_output: bool,
    pub ignore_std_error: bool,
    pub ignore_std_out: bool,
    pub working_directory: String,
    pub script: String,
}

impl ShellExec {
    pub fn script(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }
}

impl CommandKind for ShellExec {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(SHELL_EXEC)
    }

    fn params(&self) -> Params {
        Mapping::new()
            .flag("background", self.background)
            .flag("silent", self.silent)
            .flag("continue_on_err", self.continue_on_error)
            .flag("system_log", self.system_log)
            .flag("redirect_standard_error_to_output", self.combine_output)
            .flag("ignore_standard_error", self.ignore_std_error)
            .flag("ignore_standard_out", self.ignore_std_out)
            .text("working_dir", &self.working_directory)
            .text("script", &self.script)
            .into_map()
    }
}

/// Test selection for a scripting harness run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptingTestOptions {
    pub name: String,
    pub args: Vec<String>,
    pub pattern: String,
    pub timeout_secs: u32,
    pub count: u32,
}

impl ScriptingTestOptions {
    fn to_mapping(&self) -> Mapping {
        Mapping::new()
            .text("name", &self.name)
            .list("args", &self.args)
            .text("pattern", &self.pattern)
            .number("timeout_secs", self.timeout_secs)
            .number("count", self.count)
    }
}

/// Run a command inside a managed language harness
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubprocessScripting {
    pub harness: String,
    pub command: String,
    pub args: Vec<String>,
    pub test_dir: String,
    pub test_options: Option<ScriptingTestOptions>,
    pub script: String,
    pub path: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub cache_duration_seconds: u32,
    pub cleanup_harness: bool,
    pub lock_file: String,
    pub packages: Vec<String>,
    pub harness_path: String,
    pub host_path: String,
    pub add_expansions_to_env: bool,
    pub include_expansions_in_env: Vec<String>,
    pub silent: bool,
    pub system_log: bool,
    pub working_dir: String,
    pub ignore_standard_output: bool,
    pub ignore_standard_error: bool,
    pub redirect_standard_error_to_output: bool,
    pub continue_on_error: bool,
}

impl CommandKind for SubprocessScripting {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(SUBPROCESS_SCRIPTING)
    }

    fn params(&self) -> Params {
        Mapping::new()
            .text("harness", &self.harness)
            .text("command", &self.command)
            .list("args", &self.args)
            .text("test_dir", &self.test_dir)
            .nested(
                "test_options",
                self.test_options.as_ref().map(ScriptingTestOptions::to_mapping),
            )
            .text("script", &self.script)
            .list("add_to_path", &self.path)
            .strings("env", &self.env)
            .number("cache_duration_secs", self.cache_duration_seconds)
            .flag("cleanup_harness", self.cleanup_harness)
            .text("lock_file", &self.lock_file)
            .list("packages", &self.packages)
            .text("harness_path", &self.harness_path)
            .text("host_path", &self.host_path)
            .flag("add_expansions_to_env", self.add_expansions_to_env)
            .list("include_expansions_in_env", &self.include_expansions_in_env)
            .flag("silent", self.silent)
            .flag("system_log", self.system_log)
            .text("working_dir", &self.working_dir)
            .flag("ignore_standard_out", self.ignore_standard_output)
            .flag("ignore_standard_error", self.ignore_standard_error)
            .flag(
                "redirect_standard_error_to_output",
                self.redirect_standard_error_to_output,
            )
            .flag("continue_on_err", self.continue_on_error)
            .into_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_exec_renames_fields() {
        let exec = Exec {
            continue_on_error: true,
            combine_output: true,
            working_directory: "src".to_string(),
            binary: "make".to_string(),
            args: vec!["test".to_string()],
            ..Exec::default()
        };

        let params = exec.params();
        assert_eq!(params.len(), 5);
        assert_eq!(params["continue_on_err"], json!(true));
        assert_eq!(params["redirect_standard_error_to_output"], json!(true));
        assert_eq!(params["working_dir"], json!("src"));
        assert_eq!(params["binary"], json!("make"));
        assert_eq!(params["args"], json!(["test"]));
        assert!(!params.contains_key("background"));
        assert!(!params.contains_key("working_directory"));
    }

    #[test]
    fn test_exec_env() {
        let mut exec = Exec::default();
        exec.env.insert("GOPATH".to_string(), "/go".to_string());
        assert_eq!(exec.params()["env"], json!({"GOPATH": "/go"}));
    }

    #[test]
    fn test_shell_exec_resolves() {
        let definition = ShellExec::script("echo hello world!").resolve().unwrap();
        assert_eq!(definition.command_name(), Some("shell.exec"));

        let params = definition.params().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["script"], json!("echo hello world!"));
    }

    #[test]
    fn test_scripting_nested_options() {
        let scripting = SubprocessScripting {
            harness: "python".to_string(),
            path: vec!["bin".to_string()],
            cache_duration_seconds: 60,
            ignore_standard_output: true,
            test_options: Some(ScriptingTestOptions {
                pattern: "test_*".to_string(),
                ..ScriptingTestOptions::default()
            }),
            ..SubprocessScripting::default()
        };

        let params = scripting.params();
        assert_eq!(params["add_to_path"], json!(["bin"]));
        assert_eq!(params["cache_duration_secs"], json!(60));
        assert_eq!(params["ignore_standard_out"], json!(true));
        assert_eq!(params["test_options"], json!({"pattern": "test_*"}));
    }

    #[test]
    fn test_scripting_empty_options_omitted() {
        let scripting = SubprocessScripting {
            test_options: Some(ScriptingTestOptions::default()),
            ..SubprocessScripting::default()
        };

        assert!(scripting.params().is_empty());
    }

    #[test]
    fn test_exec_every_field() {
        let exec = Exec {
            background: true,
            silent: true,
            continue_on_error: true,
            system_log: true,
            combine_output: true,
            ignore_std_error: true,
            ignore_std_out: true,
            keep_empty_args: true,
            working_directory: "src".to_string(),
            command: "make test".to_string(),
            binary: "make".to_string(),
            args: vec!["test".to_string()],
            env: BTreeMap::from([("CI".to_string(), "true".to_string())]),
        };

        assert_eq!(
            Value::Object(exec.params()),
            json!({
                "background": true,
                "silent": true,
                "continue_on_err": true,
                "system_log": true,
                "redirect_standard_error_to_output": true,
                "ignore_standard_error": true,
                "ignore_standard_out": true,
                "keep_empty_args": true,
                "working_dir": "src",
                "command": "make test",
                "binary": "make",
                "args": ["test"],
                "env": {"CI": "true"}
            })
        );
    }

    #[test]
    fn test_shell_exec_every_field() {
        let shell = ShellExec {
            background: true,
            silent: true,
            continue_on_error: true,
            system_log: true,
            combine_output: true,
            ignore_std_error: true,
            ignore_std_out: true,
            working_directory: "src".to_string(),
            script: "make lint".to_string(),
        };

        assert_eq!(
            Value::Object(shell.params()),
            json!({
                "background": true,
                "silent": true,
                "continue_on_err": true,
                "system_log": true,
                "redirect_standard_error_to_output": true,
                "ignore_standard_error": true,
                "ignore_standard_out": true,
                "working_dir": "src",
                "script": "make lint"
            })
        );
    }

    #[test]
    fn test_scripting_every_field() {
        let scripting = SubprocessScripting {
            harness: "python".to_string(),
            command: "pytest".to_string(),
            args: vec!["-x".to_string()],
            test_dir: "tests".to_string(),
            test_options: Some(ScriptingTestOptions {
                name: "unit".to_string(),
                args: vec!["-q".to_string()],
                pattern: "test_*".to_string(),
                timeout_secs: 30,
                count: 2,
            }),
            script: "print(1)".to_string(),
            path: vec!["bin".to_string()],
            env: BTreeMap::from([("PYTHONPATH".to_string(), "src".to_string())]),
            cache_duration_seconds: 60,
            cleanup_harness: true,
            lock_file: "poetry.lock".to_string(),
            packages: vec!["requests".to_string()],
            harness_path: "/opt/python".to_string(),
            host_path: "/usr/bin/python3".to_string(),
            add_expansions_to_env: true,
            include_expansions_in_env: vec!["aws_key".to_string()],
            silent: true,
            system_log: true,
            working_dir: "src".to_string(),
            ignore_standard_output: true,
            ignore_standard_error: true,
            redirect_standard_error_to_output: true,
            continue_on_error: true,
        };

        assert_eq!(
            Value::Object(scripting.params()),
            json!({
                "harness": "python",
                "command": "pytest",
                "args": ["-x"],
                "test_dir": "tests",
                "test_options": {
                    "name": "unit",
                    "args": ["-q"],
                    "pattern": "test_*",
                    "timeout_secs": 30,
                    "count": 2
                },
                "script": "print(1)",
                "add_to_path": ["bin"],
                "env": {"PYTHONPATH": "src"},
                "cache_duration_secs": 60,
                "cleanup_harness": true,
                "lock_file": "poetry.lock",
                "packages": ["requests"],
                "harness_path": "/opt/python",
                "host_path": "/usr/bin/python3",
                "add_expansions_to_env": true,
                "include_expansions_in_env": ["aws_key"],
                "silent": true,
                "system_log": true,
                "working_dir": "src",
                "ignore_standard_out": true,
                "ignore_standard_error": true,
                "redirect_standard_error_to_output": true,
                "continue_on_err": true
            })
        );
    }
}
