//! Command descriptors
//!
//! A [`Command`] describes one operation before it is fixed into wire form.
//! The set of kinds is closed: each kind validates itself and maps its own
//! fields onto the wire names the CI service expects. Resolving a command
//! validates it first and only then produces a [`CommandDefinition`].

pub mod archive;
pub mod exec;
pub mod results;
pub mod s3;

pub use archive::{ArchiveCreate, ArchiveExtract, ArchiveFormat};
pub use exec::{Exec, ShellExec, ScriptingTestOptions, SubprocessScripting};
pub use results::{AttachArtifacts, GetProject, ResultsGoTest, ResultsJson, ResultsXunit};
pub use s3::{S3Copy, S3CopyFile, S3Get, S3Location, S3Pull, S3Push, S3Put};

use crate::core::sequence::{CommandDefinition, Params};
use thiserror::Error;
use tracing::{debug, warn};

/// Reasons a command can fail validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("must specify aws credentials")]
    MissingCredentials,

    #[error("must specify a local file to upload")]
    MissingLocalFile,

    #[error("'{format}' is not a valid archive format for {operation}")]
    InvalidArchiveFormat {
        format: String,
        operation: &'static str,
    },

    #[error("gotest results must select exactly one format, not both")]
    AmbiguousTestFormat,

    #[error("gotest results must select either the json or the legacy format")]
    MissingTestFormat,
}

/// Contract shared by every command kind
pub trait CommandKind {
    /// The wire name of the command
    fn name(&self) -> Result<&'static str, CommandError>;

    /// Check that the command can be resolved
    fn validate(&self) -> Result<(), CommandError> {
        Ok(())
    }

    /// The command's non-zero fields under their wire names
    fn params(&self) -> Params;

    /// Validate and convert into a wire-ready definition
    fn resolve(&self) -> Result<CommandDefinition, CommandError> {
        self.validate()?;
        let mut definition = CommandDefinition::command(self.name()?);
        definition.replace_params(self.params());
        Ok(definition)
    }
}

/// Any supported command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exec(Exec),
    ShellExec(ShellExec),
    SubprocessScripting(SubprocessScripting),
    S3Put(S3Put),
    S3Get(S3Get),
    S3Copy(S3Copy),
    S3Push(S3Push),
    S3Pull(S3Pull),
    GetProject(GetProject),
    ResultsJson(ResultsJson),
    ResultsXunit(ResultsXunit),
    ResultsGoTest(ResultsGoTest),
    ArchiveCreate(ArchiveCreate),
    ArchiveExtract(ArchiveExtract),
    AttachArtifacts(AttachArtifacts),
}

macro_rules! dispatch {
    ($command:expr, $inner:ident => $body:expr) => {
        match $command {
            Command::Exec($inner) => $body,
            Command::ShellExec($inner) => $body,
            Command::SubprocessScripting($inner) => $body,
            Command::S3Put($inner) => $body,
            Command::S3Get($inner) => $body,
            Command::S3Copy($inner) => $body,
            Command::S3Push($inner) => $body,
            Command::S3Pull($inner) => $body,
            Command::GetProject($inner) => $body,
            Command::ResultsJson($inner) => $body,
            Command::ResultsXunit($inner) => $body,
            Command::ResultsGoTest($inner) => $body,
            Command::ArchiveCreate($inner) => $body,
            Command::ArchiveExtract($inner) => $body,
            Command::AttachArtifacts($inner) => $body,
        }
    };
}

macro_rules! impl_from_kind {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for Command {
                fn from(command: $kind) -> Self {
                    Command::$kind(command)
                }
            }
        )*
    };
}

impl_from_kind!(
    Exec,
    ShellExec,
    SubprocessScripting,
    S3Put,
    S3Get,
    S3Copy,
    S3Push,
    S3Pull,
    GetProject,
    ResultsJson,
    ResultsXunit,
    ResultsGoTest,
    ArchiveCreate,
    ArchiveExtract,
    AttachArtifacts,
);

impl CommandKind for Command {
    fn name(&self) -> Result<&'static str, CommandError> {
        dispatch!(self, c => c.name())
    }

    fn validate(&self) -> Result<(), CommandError> {
        dispatch!(self, c => c.validate())
    }

    fn params(&self) -> Params {
        dispatch!(self, c => c.params())
    }

    fn resolve(&self) -> Result<CommandDefinition, CommandError> {
        match dispatch!(self, c => c.resolve()) {
            Ok(definition) => {
                debug!(command = ?definition.command_name(), "resolved command");
                Ok(definition)
            }
            Err(e) => {
                warn!(error = %e, "command failed validation");
                Err(e)
            }
        }
    }
}

impl Command {
    /// The zero-valued command registered under a wire name
    ///
    /// Archive names return a command with the matching format preset.
    pub fn from_name(name: &str) -> Option<Command> {
        let command = match name {
            exec::EXEC => Exec::default().into(),
            exec::SHELL_EXEC => ShellExec::default().into(),
            exec::SUBPROCESS_SCRIPTING => SubprocessScripting::default().into(),
            s3::PUT => S3Put::default().into(),
            s3::GET => S3Get::default().into(),
            s3::COPY => S3Copy::default().into(),
            s3::PUSH => S3Push::default().into(),
            s3::PULL => S3Pull::default().into(),
            results::GET_PROJECT => GetProject::default().into(),
            results::ATTACH_RESULTS => ResultsJson::default().into(),
            results::ATTACH_XUNIT => ResultsXunit::default().into(),
            results::ATTACH_ARTIFACTS => AttachArtifacts::default().into(),
            results::GOTEST_JSON => ResultsGoTest::json(Vec::new()).into(),
            results::GOTEST_FILES => ResultsGoTest::legacy(Vec::new()).into(),
            archive::ZIP_PACK => ArchiveCreate::new(ArchiveFormat::Zip).into(),
            archive::TARGZ_PACK => ArchiveCreate::new(ArchiveFormat::Tarball).into(),
            archive::ZIP_EXTRACT => ArchiveExtract::new(ArchiveFormat::Zip).into(),
            archive::TARGZ_EXTRACT => ArchiveExtract::new(ArchiveFormat::Tarball).into(),
            archive::AUTO_EXTRACT => ArchiveExtract::new(ArchiveFormat::Auto).into(),
            _ => return None,
        };
        Some(command)
    }
}
