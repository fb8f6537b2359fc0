//! Test: Document output - omission rules and schema names

use crate::helpers::*;
use serde_json::json;
use shrub::{
    CommandKind, Configuration, DisplayTaskDefinition, EncodeOptions, Exec, S3Push, Schema,
    ShellExec, TaskSpec, Vars,
};

#[test]
fn test_params_round_trip_only_non_zero_fields() {
    let exec = Exec {
        silent: true,
        command: "make test".to_string(),
        ..Exec::default()
    };

    let definition = exec.resolve().unwrap();
    let decoded: serde_json::Value = serde_json::to_value(definition.params().unwrap()).unwrap();
    assert_eq!(decoded, json!({"silent": true, "command": "make test"}));
}

#[test]
fn test_full_project_interchange() {
    let mut config = Configuration::new();
    config
        .function("fetch")
        .add(ShellExec::script("git fetch"))
        .unwrap();

    let mut vars = Vars::new();
    vars.insert("mode".to_string(), "fast".to_string());
    config
        .task("compile")
        .function(["fetch"])
        .function_with_vars("build", Some(vars))
        .command([S3Push {
            max_retries: 3,
            ..S3Push::default()
        }])
        .unwrap();

    config
        .variant("linux")
        .display_name("Linux")
        .run_on("ubuntu2204")
        .add_tasks(["compile"])
        .display_tasks([DisplayTaskDefinition::new("all", ["compile"])]);

    let doc = document(&config, Schema::Interchange);
    assert_eq!(
        doc,
        json!({
            "functions": {
                "fetch": [{"command": "shell.exec", "params": {"script": "git fetch"}}]
            },
            "tasks": [{
                "name": "compile",
                "commands": [
                    {"func": "fetch"},
                    {"func": "build", "vars": {"mode": "fast"}},
                    {"command": "s3.push", "params": {"max_retries": 3}}
                ]
            }],
            "buildvariants": [{
                "name": "linux",
                "display_name": "Linux",
                "tasks": [{"name": "compile"}],
                "run_on": ["ubuntu2204"],
                "display_tasks": [{"name": "all", "execution_tasks": ["compile"]}]
            }]
        })
    );
}

#[test]
fn test_authored_yaml_uses_authored_names() {
    let mut config = Configuration::new();
    config.task("compile").priority(10);
    let mut spec = TaskSpec::new("compile");
    spec.set_distros(vec!["rhel".to_string()]);
    config.variant("rhel").task_spec(spec);

    let yaml = shrub::document::encode(
        &config,
        &EncodeOptions::new().with_schema(Schema::Authored),
    )
    .unwrap();

    assert!(yaml.contains("priority_override: 10"));
    assert!(yaml.contains("distro:"));
    assert!(!yaml.contains("distros:"));
}

#[test]
fn test_compact_json() {
    let mut config = Configuration::new();
    config.task("t");

    let text = shrub::document::encode(&config, &EncodeOptions::new().with_pretty(false)).unwrap();
    assert_eq!(text, r#"{"tasks":[{"commands":[],"name":"t"}]}"#);
}
