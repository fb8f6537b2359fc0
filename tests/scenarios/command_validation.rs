//! Test: Command validation - invalid commands never reach a sequence

use crate::helpers::*;
use shrub::{
    build_configuration, ArchiveCreate, ArchiveFormat, Command, CommandError, CommandKind,
    Configuration, ConfigurationBuilder, Exec, ResultsGoTest, S3Put, ShellExec,
};

#[test]
fn test_empty_upload_is_rejected() {
    let mut config = Configuration::new();
    let result = config.task("upload").command([S3Put::default()]);

    assert_eq!(result.err(), Some(CommandError::MissingCredentials));
    assert_eq!(config.task("upload").commands.len(), 0);
}

#[test]
fn test_default_exec_is_accepted() {
    let mut config = Configuration::new();
    config.task("run").command([Exec::default()]).unwrap();

    let commands = &config.find_task("run").unwrap().commands;
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].command_name(), Some("subprocess.exec"));
    assert!(commands[0].params().unwrap().is_empty());
}

#[test]
fn test_failed_batch_leaves_sequence_untouched() {
    let mut config = Configuration::new();
    config.task("t").command([ShellExec::script("first")]).unwrap();

    let batch: Vec<Command> = vec![
        ShellExec::script("second").into(),
        valid_upload().into(),
        S3Put::default().into(),
    ];
    assert!(config.task("t").command(batch).is_err());

    assert_eq!(command_names(&config.task("t").commands), vec!["shell.exec"]);
}

#[test]
fn test_gotest_format_selection() {
    let both = ResultsGoTest {
        json_format: true,
        legacy_format: true,
        files: vec![],
    };
    let neither = ResultsGoTest::default();
    assert!(both.validate().is_err());
    assert!(neither.validate().is_err());

    let mut config = Configuration::new();
    config
        .task("results")
        .command([ResultsGoTest::json(vec!["out.json".to_string()])])
        .unwrap()
        .command([ResultsGoTest::legacy(vec!["out.txt".to_string()])])
        .unwrap();

    assert_eq!(
        command_names(&config.task("results").commands),
        vec!["gotest.parse_json", "gotest.parse_files"]
    );
}

#[test]
fn test_archive_format_drives_name() {
    let mut config = Configuration::new();
    config
        .function("package")
        .extend([
            ArchiveCreate::new(ArchiveFormat::Zip),
            ArchiveCreate::new(ArchiveFormat::Tarball),
        ])
        .unwrap();

    assert_eq!(
        command_names(&config.functions["package"]),
        vec!["archive.zip_pack", "archive.targz_pack"]
    );

    let result = config.function("package").add(ArchiveCreate::new(ArchiveFormat::Auto));
    assert!(matches!(result, Err(CommandError::InvalidArchiveFormat { .. })));
    assert_eq!(config.functions["package"].len(), 2);
}

#[test]
fn test_boundary_converts_failure_to_error() {
    let result = build_configuration(|conf| {
        conf.task("ok").command([Exec::default()])?;
        conf.task("bad").command([S3Put::default()])?;
        Ok(())
    });

    assert!(result.is_err());
}

#[test]
fn test_builder_reports_first_failure() {
    let result = ConfigurationBuilder::new()
        .task_group("deploy", |g| {
            g.setup_group([valid_upload()])?;
            Ok(())
        })
        .task_group("broken", |g| {
            g.teardown_task([ArchiveCreate::default()])?;
            Ok(())
        })
        .task("after", |t| {
            t.command([S3Put::default()])?;
            Ok(())
        })
        .finalize();

    let err = result.unwrap_err();
    assert_eq!(err.name, "broken");
    assert!(matches!(err.source, CommandError::InvalidArchiveFormat { .. }));
}
