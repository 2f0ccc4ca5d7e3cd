use std::path::Path;

use serde_json::Value;
use specgate_core::{CheckEntry, CheckMode, Group, ResultSet, Status};

use crate::collect::{FixtureLayout, collect_fixtures};
use crate::errors::{FixtureError, Result};
use crate::validator::{SchemaViolation, StructuralValidator};

/// Classify every fixture under `base`: `good` first, then `bad`.
pub fn classify_fixtures<V>(
    validator: &V,
    schema_ref: &str,
    base: &Path,
    layout: &FixtureLayout,
) -> Result<ResultSet>
where
    V: StructuralValidator + ?Sized,
{
    if !base.is_dir() {
        return Err(FixtureError::BaseNotFound(base.to_path_buf()));
    }

    let fixtures = collect_fixtures(base, layout)?;
    tracing::info!(
        event = "fixtures_collected",
        base = %base.display(),
        good = fixtures.good.len(),
        bad = fixtures.bad.len()
    );

    let mut results =
        ResultSet::new(CheckMode::Fixtures, schema_ref).with_base(base.display().to_string());
    if fixtures.is_empty() {
        tracing::warn!(event = "fixtures_empty", base = %base.display());
        results.warn(format!("no fixtures found under {}", base.display()));
    }

    for path in &fixtures.good {
        results.push(classify_artifact(validator, path, Group::Good)?);
    }
    for path in &fixtures.bad {
        results.push(classify_artifact(validator, path, Group::Bad)?);
    }

    Ok(results)
}

/// Classify one artifact as expect-valid, without paired-group framing.
pub fn classify_single<V>(validator: &V, schema_ref: &str, file: &Path) -> Result<ResultSet>
where
    V: StructuralValidator + ?Sized,
{
    if !file.is_file() {
        return Err(FixtureError::ArtifactNotFound(file.to_path_buf()));
    }

    let mut results =
        ResultSet::new(CheckMode::Single, schema_ref).with_subject(file.display().to_string());
    results.push(classify_artifact(validator, file, Group::Single)?);
    Ok(results)
}

/// Validate one artifact and map the outcome through its group expectation.
pub fn classify_artifact<V>(validator: &V, path: &Path, group: Group) -> Result<CheckEntry>
where
    V: StructuralValidator + ?Sized,
{
    let outcome = match load_artifact(path)? {
        Ok(instance) => validator.check(&instance),
        Err(violation) => Err(violation),
    };

    let status = Status::classify(group.expects_valid(), outcome.is_ok());
    let detail = outcome.err().map(|violation| violation.to_string());

    tracing::info!(
        event = "artifact_classified",
        path = %path.display(),
        group = group.as_str(),
        status = status.as_str()
    );

    Ok(CheckEntry::new(
        path.display().to_string(),
        group,
        status,
        detail,
    ))
}

/// Read an artifact; bytes that are not a JSON document are a violation,
/// unreadable files are errors.
fn load_artifact(path: &Path) -> Result<std::result::Result<Value, SchemaViolation>> {
    let bytes = std::fs::read(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes).map_err(|err| SchemaViolation::unparseable(&err)))
}
