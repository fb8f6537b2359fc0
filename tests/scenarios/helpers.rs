//! Test utility functions for shrub scenarios

use serde_json::Value;
use shrub::{CommandSequence, Configuration, Schema, ToDocument};

/// Credentials and a source file, enough for an upload to validate
pub fn valid_upload() -> shrub::S3Put {
    shrub::S3Put {
        cred_key: "key".to_string(),
        cred_secret: "secret".to_string(),
        local_file: "dist.tgz".to_string(),
        bucket: "releases".to_string(),
        ..shrub::S3Put::default()
    }
}

/// Wire names of every command in a sequence, in order
pub fn command_names(seq: &CommandSequence) -> Vec<String> {
    seq.iter()
        .map(|d| {
            d.command_name()
                .or(d.function_name())
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

/// Encode under a schema
pub fn document(config: &Configuration, schema: Schema) -> Value {
    config.to_document(schema)
}

/// Assert a configuration holds exactly one task named `name`
pub fn assert_single_task(config: &Configuration, name: &str) {
    let matching = config.tasks.iter().filter(|t| t.name == name).count();
    assert_eq!(matching, 1, "expected exactly one task named '{}'", name);
}
