//! shrub - build CI project configurations in code
//!
//! Start from a [`Configuration`] and add functions, tasks, task groups and
//! build variants through its get-or-create accessors:
//!
//! ```
//! use shrub::{Configuration, GetProject, ShellExec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conf = Configuration::new();
//!
//! conf.function("my-new-func")
//!     .add(GetProject::directory("my-working-directory"))?
//!     .add(ShellExec::script("echo hello world!"))?;
//!
//! conf.task("my-new-task").function(["my-new-func"]);
//!
//! conf.variant("my-new-build-variant")
//!     .run_on("some-distro")
//!     .add_tasks(["my-new-task"]);
//!
//! let yaml = conf.to_yaml()?;
//! assert!(yaml.contains("my-new-func"));
//! # Ok(())
//! # }
//! ```
//!
//! Commands are validated when they are attached; an invalid command is
//! never added and the attaching call returns a [`CommandError`].

pub mod command;
pub mod core;
pub mod document;

// Re-export commonly used types
pub use crate::command::{
    ArchiveCreate, ArchiveExtract, ArchiveFormat, AttachArtifacts, Command, CommandError,
    CommandKind, Exec, GetProject, ResultsGoTest, ResultsJson, ResultsXunit, S3Copy, S3CopyFile,
    S3Get, S3Location, S3Pull, S3Push, S3Put, ScriptingTestOptions, ShellExec,
    SubprocessScripting,
};
pub use crate::core::{
    build_configuration, BuildError, CheckRun, CommandDefinition, CommandSequence, CommandTarget,
    Configuration, ConfigurationBuilder, DisplayTaskDefinition, EntityKind, ExecutionType,
    Expansions, Params, Task, TaskDependency, TaskGroup, TaskSpec, Variant, Vars,
};
pub use crate::document::{EncodeError, EncodeOptions, Schema, ToDocument};
