//! Test: Registry - names map to one shared entity

use crate::helpers::*;
use shrub::{Configuration, Exec, TaskDependency};

#[test]
fn test_task_identity_across_lookups() {
    let mut config = Configuration::new();

    config.task("compile").priority(3);
    config
        .task("compile")
        .dependency([TaskDependency::new("lint")]);
    config.task("compile").command([Exec::default()]).unwrap();

    assert_single_task(&config, "compile");
    let task = config.find_task("compile").unwrap();
    assert_eq!(task.priority_override, 3);
    assert_eq!(task.dependencies.len(), 1);
    assert_eq!(task.commands.len(), 1);
}

#[test]
fn test_registry_preserves_creation_order() {
    let mut config = Configuration::new();
    for name in ["c", "a", "b", "a"] {
        config.task(name);
        config.variant(name);
        config.task_group(name);
    }

    let tasks: Vec<_> = config.tasks.iter().map(|t| t.name.as_str()).collect();
    let variants: Vec<_> = config.variants.iter().map(|v| v.build_name.as_str()).collect();
    let groups: Vec<_> = config.groups.iter().map(|g| g.group_name.as_str()).collect();
    assert_eq!(tasks, vec!["c", "a", "b"]);
    assert_eq!(variants, vec!["c", "a", "b"]);
    assert_eq!(groups, vec!["c", "a", "b"]);
}

#[test]
fn test_function_identity() {
    let mut config = Configuration::new();
    config.function("setup").function("inner");
    config.function("setup").function("inner");

    assert_eq!(config.functions.len(), 1);
    assert_eq!(command_names(&config.functions["setup"]), vec!["inner", "inner"]);
}

#[test]
fn test_variant_run_on_last_write_wins() {
    let mut config = Configuration::new();
    config.variant("linux").run_on("foo");
    config.variant("linux").run_on("bar");

    assert_eq!(config.variants[0].distro_run_on, vec!["bar".to_string()]);
}
