use std::fmt;
use std::path::Path;

use jsonschema::{CompilationOptions, Draft, JSONSchema};
use serde_json::Value;

use crate::errors::{FixtureError, Result};

/// Primary violation reported for an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Instance location, `/`-joined, empty at the document root.
    pub path: String,
    /// Schema keyword that rejected the instance.
    pub keyword: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(
        path: impl Into<String>,
        keyword: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    /// Violation for a document that could not be parsed at all.
    pub fn unparseable(message: impl fmt::Display) -> Self {
        Self::new("", "parse", format!("invalid JSON: {message}"))
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.path.is_empty() {
            "(root)"
        } else {
            self.path.as_str()
        };
        write!(
            f,
            "{} [at: {}; validator: {}]",
            self.message, location, self.keyword
        )
    }
}

/// Structural validation capability consumed by the classifier.
pub trait StructuralValidator {
    /// Returns the first violation, or `Ok(())` when the instance is valid.
    fn check(&self, instance: &Value) -> std::result::Result<(), SchemaViolation>;
}

/// JSON Schema (draft 2020-12) validator.
pub struct JsonSchemaValidator {
    compiled: JSONSchema,
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator").finish_non_exhaustive()
    }
}

impl JsonSchemaValidator {
    /// Compile a schema; compilation checks it against the draft meta-schema.
    pub fn compile(schema: &Value) -> Result<Self> {
        let mut options = CompilationOptions::default();
        options.with_draft(Draft::Draft202012);
        let compiled = options
            .compile(schema)
            .map_err(|err| FixtureError::InvalidSchema(err.to_string()))?;
        Ok(Self { compiled })
    }

    /// Load a schema file and compile it.
    pub fn from_path(path: &Path) -> Result<Self> {
        let schema = load_schema(path)?;
        Self::compile(&schema).map_err(|err| match err {
            FixtureError::InvalidSchema(message) => {
                FixtureError::InvalidSchema(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }
}

impl StructuralValidator for JsonSchemaValidator {
    fn check(&self, instance: &Value) -> std::result::Result<(), SchemaViolation> {
        let Err(mut errors) = self.compiled.validate(instance) else {
            return Ok(());
        };
        let Some(error) = errors.next() else {
            return Ok(());
        };

        let path = error
            .instance_path
            .to_string()
            .trim_start_matches('/')
            .to_string();
        let schema_path = error.schema_path.to_string();
        let keyword = schema_path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("schema")
            .to_string();

        Err(SchemaViolation::new(path, keyword, error.to_string()))
    }
}

/// Read and parse a schema document.
pub fn load_schema(path: &Path) -> Result<Value> {
    if !path.is_file() {
        return Err(FixtureError::SchemaNotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| FixtureError::SchemaJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Confirm a schema file is well-formed without classifying anything.
pub fn check_schema_file(path: &Path) -> Result<()> {
    JsonSchemaValidator::from_path(path)?;
    tracing::info!(event = "schema_checked", path = %path.display());
    Ok(())
}
