//! Document encoding
//!
//! A configuration is written under one of two schemas. The interchange
//! schema is the structured form the service consumes as JSON; the authored
//! schema is the hand-written YAML project file. A few fields are named
//! differently in each, so every entity field carries both names.

pub mod encode;
pub mod mapping;

pub use encode::ToDocument;
pub use mapping::Mapping;

use thiserror::Error;

/// Target schema for encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schema {
    /// Structured interchange form, rendered as JSON
    #[default]
    Interchange,
    /// Human-authored project file, rendered as YAML
    Authored,
}

/// A field's external name in each schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub interchange: &'static str,
    pub authored: &'static str,
}

impl Field {
    /// A field named the same in both schemas
    pub const fn same(name: &'static str) -> Self {
        Self {
            interchange: name,
            authored: name,
        }
    }

    pub const fn renamed(interchange: &'static str, authored: &'static str) -> Self {
        Self {
            interchange,
            authored,
        }
    }

    pub fn key(&self, schema: Schema) -> &'static str {
        match schema {
            Schema::Interchange => self.interchange,
            Schema::Authored => self.authored,
        }
    }
}

/// Errors from rendering a document to text
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Options for rendering a document
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Schema to encode under; interchange renders JSON, authored renders YAML
    pub schema: Schema,

    /// Indent JSON output (YAML is always block-formatted)
    pub pretty: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            schema: Schema::Interchange,
            pretty: true,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Render a value to text according to the options
pub fn encode<T: ToDocument + ?Sized>(value: &T, options: &EncodeOptions) -> Result<String, EncodeError> {
    let document = value.to_document(options.schema);
    let text = match options.schema {
        Schema::Interchange if options.pretty => serde_json::to_string_pretty(&document)?,
        Schema::Interchange => serde_json::to_string(&document)?,
        Schema::Authored => serde_yaml::to_string(&document)?,
    };
    Ok(text)
}

/// Render to JSON under the interchange schema
pub fn to_json<T: ToDocument + ?Sized>(value: &T) -> Result<String, EncodeError> {
    encode(value, &EncodeOptions::new())
}

/// Render to YAML under the authored schema
pub fn to_yaml<T: ToDocument + ?Sized>(value: &T) -> Result<String, EncodeError> {
    encode(value, &EncodeOptions::new().with_schema(Schema::Authored))
}
