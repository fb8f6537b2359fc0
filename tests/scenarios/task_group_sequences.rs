//! Test: Task groups - five independent command sequences

use shrub::{Command, Configuration, Exec, S3Put, ShellExec, TaskGroup};

fn lengths(group: &TaskGroup) -> [usize; 5] {
    [
        group.setup_group_cmds.len(),
        group.setup_task_cmds.len(),
        group.teardown_task_cmds.len(),
        group.teardown_group_cmds.len(),
        group.timeout_cmds.len(),
    ]
}

#[test]
fn test_sequences_are_independent() {
    let mut config = Configuration::new();
    let group = config.task_group("integration");

    group.setup_group([ShellExec::default()]).unwrap();
    assert_eq!(lengths(group), [1, 0, 0, 0, 0]);

    group.setup_task([Exec::default()]).unwrap();
    assert_eq!(lengths(group), [1, 1, 0, 0, 0]);

    group
        .teardown_task([Command::from(ShellExec::default()), Exec::default().into()])
        .unwrap();
    assert_eq!(lengths(group), [1, 1, 2, 0, 0]);

    group.teardown_group([Exec::default()]).unwrap();
    assert_eq!(lengths(group), [1, 1, 2, 1, 0]);

    group.timeout([Exec::default()]).unwrap();
    assert_eq!(lengths(group), [1, 1, 2, 1, 1]);
}

#[test]
fn test_empty_calls_are_noops() {
    let mut group = TaskGroup::new("g");
    group.setup_group(Vec::<Command>::new()).unwrap();
    group.setup_task(Vec::<Command>::new()).unwrap();
    group.teardown_task(Vec::<Command>::new()).unwrap();
    group.teardown_group(Vec::<Command>::new()).unwrap();
    group.timeout(Vec::<Command>::new()).unwrap();
    group.task(Vec::<String>::new()).tag(Vec::<String>::new());

    assert_eq!(lengths(&group), [0, 0, 0, 0, 0]);
    assert!(group.tasks.is_empty());
    assert!(group.tags.is_empty());
}

#[test]
fn test_invalid_command_rejected_in_every_sequence() {
    let mut group = TaskGroup::new("g");
    assert!(group.setup_group([S3Put::default()]).is_err());
    assert!(group.setup_task([S3Put::default()]).is_err());
    assert!(group.teardown_task([S3Put::default()]).is_err());
    assert!(group.teardown_group([S3Put::default()]).is_err());
    assert!(group.timeout([S3Put::default()]).is_err());

    assert_eq!(lengths(&group), [0, 0, 0, 0, 0]);
}
