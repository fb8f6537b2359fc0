//! Archive create and extract commands
//!
//! The wire name of an archive command depends only on its format.

use crate::command::{CommandError, CommandKind};
use crate::core::sequence::Params;
use crate::document::Mapping;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub(crate) const ZIP_PACK: &str = "archive.zip_pack";
pub(crate) const TARGZ_PACK: &str = "archive.targz_pack";
pub(crate) const ZIP_EXTRACT: &str = "archive.zip_extract";
pub(crate) const TARGZ_EXTRACT: &str = "archive.targz_extract";
pub(crate) const AUTO_EXTRACT: &str = "archive.auto_extract";

/// Archive formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    Zip,
    Tarball,
    /// Detect the format when extracting; not valid for creation
    Auto,
}

impl ArchiveFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tarball => "tarball",
            ArchiveFormat::Auto => "auto",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveFormat {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zip" => Ok(ArchiveFormat::Zip),
            "tarball" => Ok(ArchiveFormat::Tarball),
            "auto" => Ok(ArchiveFormat::Auto),
            other => Err(CommandError::InvalidArchiveFormat {
                format: other.to_string(),
                operation: "archive",
            }),
        }
    }
}

fn invalid_format(format: Option<ArchiveFormat>, operation: &'static str) -> CommandError {
    CommandError::InvalidArchiveFormat {
        format: format.map(|f| f.to_string()).unwrap_or_default(),
        operation,
    }
}

/// Pack files from a directory into an archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveCreate {
    pub format: Option<ArchiveFormat>,
    pub target: String,
    pub source_dir: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl ArchiveCreate {
    pub fn new(format: ArchiveFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }
}

impl CommandKind for ArchiveCreate {
    fn name(&self) -> Result<&'static str, CommandError> {
        match self.format {
            Some(ArchiveFormat::Zip) => Ok(ZIP_PACK),
            Some(ArchiveFormat::Tarball) => Ok(TARGZ_PACK),
            other => Err(invalid_format(other, "create")),
        }
    }

    fn validate(&self) -> Result<(), CommandError> {
        self.name().map(|_| ())
    }

    fn params(&self) -> Params {
        Mapping::new()
            .text("target", &self.target)
            .text("source_dir", &self.source_dir)
            .list("include", &self.include)
            .list("exclude_files", &self.exclude)
            .into_map()
    }
}

/// Unpack an archive into a directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveExtract {
    pub format: Option<ArchiveFormat>,
    pub path: String,
    pub target: String,
    pub exclude: Vec<String>,
}

impl ArchiveExtract {
    pub fn new(format: ArchiveFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }
}

impl CommandKind for ArchiveExtract {
    fn name(&self) -> Result<&'static str, CommandError> {
        match self.format {
            Some(ArchiveFormat::Zip) => Ok(ZIP_EXTRACT),
            Some(ArchiveFormat::Tarball) => Ok(TARGZ_EXTRACT),
            Some(ArchiveFormat::Auto) => Ok(AUTO_EXTRACT),
            None => Err(invalid_format(None, "extract")),
        }
    }

    fn validate(&self) -> Result<(), CommandError> {
        self.name().map(|_| ())
    }

    fn params(&self) -> Params {
        Mapping::new()
            .text("path", &self.path)
            .text("destination", &self.target)
            .list("exclude_files", &self.exclude)
            .into_map()
    }
}
