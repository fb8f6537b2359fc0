//! Object storage commands

use crate::command::{CommandError, CommandKind};
use crate::core::sequence::Params;
use crate::document::Mapping;

pub(crate) const PUT: &str = "s3.put";
pub(crate) const GET: &str = "s3.get";
pub(crate) const COPY: &str = "s3Copy.copy";
pub(crate) const PUSH: &str = "s3.push";
pub(crate) const PULL: &str = "s3.pull";

/// Upload one file, or every file matching the include filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Put {
    /// A missing local file is not an error
    pub optional: bool,

    /// Single file to upload
    pub local_file: String,

    /// Glob patterns selecting several files; used when `local_file` is empty
    pub local_file_include_filter: Vec<String>,

    pub bucket: String,

    /// Object key, or key prefix when uploading by filter
    pub remote_file: String,

    /// Link text shown for the uploaded file
    pub display_name: String,

    pub content_type: String,

    /// Access key id, required
    pub cred_key: String,

    /// Secret access key, required
    pub cred_secret: String,

    /// Canned ACL applied to the object
    pub permissions: String,

    /// Who may see the uploaded link
    pub visibility: String,

    /// Only run in these build variants
    pub build_variants: Vec<String>,
}

impl CommandKind for S3Put {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(PUT)
    }

    fn validate(&self) -> Result<(), CommandError> {
        if self.cred_key.is_empty() || self.cred_secret.is_empty() {
            return Err(CommandError::MissingCredentials);
        }
        if self.local_file.is_empty() && self.local_file_include_filter.is_empty() {
            return Err(CommandError::MissingLocalFile);
        }
        Ok(())
    }

    fn params(&self) -> Params {
        Mapping::new()
            .flag("optional", self.optional)
            .text("local_file", &self.local_file)
            .list("local_files_include_filter", &self.local_file_include_filter)
            .text("bucket", &self.bucket)
            .text("remote_file", &self.remote_file)
            .text("display_name", &self.display_name)
            .text("content_type", &self.content_type)
            .text("aws_key", &self.cred_key)
            .text("aws_secret", &self.cred_secret)
            .text("permissions", &self.permissions)
            .text("visibility", &self.visibility)
            .list("build_variants", &self.build_variants)
            .into_map()
    }
}

/// Download a file, optionally extracting it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Get {
    pub aws_key: String,
    pub aws_secret: String,
    pub remote_file: String,
    pub bucket: String,
    pub local_file: String,
    pub extract_to: String,
    pub build_variants: Vec<String>,
}

impl CommandKind for S3Get {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(GET)
    }

    fn params(&self) -> Params {
        Mapping::new()
            .text("aws_key", &self.aws_key)
            .text("aws_secret", &self.aws_secret)
            .text("remote_file", &self.remote_file)
            .text("bucket", &self.bucket)
            .text("local_file", &self.local_file)
            .text("extract_to", &self.extract_to)
            .list("build_variants", &self.build_variants)
            .into_map()
    }
}

/// A bucket and path pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    pub path: String,
}

impl S3Location {
    pub fn new(bucket: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            path: path.into(),
        }
    }

    fn to_mapping(&self) -> Mapping {
        Mapping::new()
            .text("bucket", &self.bucket)
            .text("path", &self.path)
    }
}

/// One source-to-destination copy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3CopyFile {
    pub optional: bool,
    pub display_name: String,
    pub build_variants: Vec<String>,
    pub source: S3Location,
    pub destination: S3Location,
}

impl S3CopyFile {
    fn to_mapping(&self) -> Mapping {
        Mapping::new()
            .flag("optional", self.optional)
            .text("display_name", &self.display_name)
            .list("build_variants", &self.build_variants)
            .nested("source", Some(self.source.to_mapping()))
            .nested("destination", Some(self.destination.to_mapping()))
    }
}

/// Copy objects between buckets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Copy {
    pub aws_key: String,
    pub aws_secret: String,
    pub files: Vec<S3CopyFile>,
}

impl CommandKind for S3Copy {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(COPY)
    }

    fn params(&self) -> Params {
        let files = self
            .files
            .iter()
            .map(|f| f.to_mapping().into_value())
            .collect();

        Mapping::new()
            .text("aws_key", &self.aws_key)
            .text("aws_secret", &self.aws_secret)
            .entries("s3_copy_files", files)
            .into_map()
    }
}

/// Push the task's working directory to the shared store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Push {
    pub exclude_filter: String,
    pub max_retries: u32,
}

impl CommandKind for S3Push {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(PUSH)
    }

    fn params(&self) -> Params {
        Mapping::new()
            .text("exclude", &self.exclude_filter)
            .number("max_retries", self.max_retries)
            .into_map()
    }
}

/// Pull a previously pushed working directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Pull {
    pub exclude_filter: String,
    pub max_retries: u32,
}

impl CommandKind for S3Pull {
    fn name(&self) -> Result<&'static str, CommandError> {
        Ok(PULL)
    }

    fn params(&self) -> Params {
        Mapping::new()
            .text("exclude", &self.exclude_filter)
            .number("max_retries", self.max_retries)
            .into_map()
    }
}
