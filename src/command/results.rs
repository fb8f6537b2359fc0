//! Source checkout and result attachment commands

use crate::command::{CommandError, CommandKind};
use crate::core::sequence::Params;
use crate::document::Mapping;
use std::collections::BTreeMap;

pub(crate) const GET_PROJECT: &str = "git.get_project";
pub(crate) const ATTACH_RESULTS: &str = "attach.results";
pub(crate) const ATTACH_XUNIT: &str = "attach.xunit_results";
pub(crate) const ATTACH_ARTIFACTS: &str = "attach.artifacts";
pub(crate) const GOTEST_JSON: &str = "gotest.parse_json";
pub(crate) const GOTEST_FILES: &str = "gotest.parse_files";

/// Check out the project's source, plus module revisions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetProject {
    pub token: String,
    pub directory: String,
    pub revisions: BTreeMap<String, String>,
}

impl GetProject {
    pub fn directory(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }
}

impl CommandKind for GetProject {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(GET_PROJECT)
    }

    fn params(&self) -> Params {
        Mapping::new()
            .text("token", &self.token)
            .text("directory", &self.directory)
            .strings("revisions", &self.revisions)
            .into_map()
    }
}

/// Attach a results file in the service's native JSON format
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsJson {
    pub file: String,
}

impl CommandKind for ResultsJson {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(ATTACH_RESULTS)
    }

    fn params(&self) -> Params {
        Mapping::new().text("file_location", &self.file).into_map()
    }
}

/// Attach xunit-style XML reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsXunit {
    pub file: String,
    pub files: Vec<String>,
}

impl CommandKind for ResultsXunit {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(ATTACH_XUNIT)
    }

    fn params(&self) -> Params {
        Mapping::new()
            .text("file", &self.file)
            .list("files", &self.files)
            .into_map()
    }
}

/// Parse go test output, either the JSON stream or the legacy text format
///
/// Exactly one of the two format flags must be set; it selects the wire
/// name and is never emitted as a parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsGoTest {
    pub json_format: bool,
    pub legacy_format: bool,
    pub files: Vec<String>,
}

impl ResultsGoTest {
    pub fn json(files: Vec<String>) -> Self {
        Self {
            json_format: true,
            legacy_format: false,
            files,
        }
    }

    pub fn legacy(files: Vec<String>) -> Self {
        Self {
            json_format: false,
            legacy_format: true,
            files,
        }
    }
}

impl CommandKind for ResultsGoTest {
    fn name(&self) -> Result<&'static str, CommandError> {
        self.validate()?;
        if self.legacy_format {
            Ok(GOTEST_FILES)
        } else {
            Ok(GOTEST_JSON)
        }
    }

    fn validate(&self) -> Result<(), CommandError> {
        match (self.json_format, self.legacy_format) {
            (true, true) => Err(CommandError::AmbiguousTestFormat),
            (false, false) => Err(CommandError::MissingTestFormat),
            _ => Ok(()),
        }
    }

    fn params(&self) -> Params {
        Mapping::new().list("files", &self.files).into_map()
    }
}

/// Attach artifact descriptions from JSON files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachArtifacts {
    pub optional: bool,
    pub files: Vec<String>,
}

impl CommandKind for AttachArtifacts {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(ATTACH_ARTIFACTS)
    }

    fn params(&self) -> Params {
        Mapping::new()
            .flag("optional", self.optional)
            .list("files", &self.files)
            .into_map()
    }
}
