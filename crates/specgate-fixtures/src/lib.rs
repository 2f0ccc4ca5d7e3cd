//! Fixture classification against a JSON Schema.
//!
//! Fixtures live in `good/` (expected to validate) and `bad/` (expected to be
//! rejected). A bad fixture that validates is a defect just like a good one
//! that fails.

pub mod classify;
pub mod collect;
pub mod errors;
pub mod validator;

pub use classify::{classify_artifact, classify_fixtures, classify_single};
pub use collect::{FixtureLayout, FixtureSet, collect_fixtures};
pub use errors::{FixtureError, Result};
pub use validator::{
    JsonSchemaValidator, SchemaViolation, StructuralValidator, check_schema_file, load_schema,
};
