use std::path::{Path, PathBuf};

use crate::errors::{FixtureError, Result};

/// Directory names and extension used to discover fixtures under a base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureLayout {
    pub good_dir: String,
    pub bad_dir: String,
    pub extension: String,
}

impl Default for FixtureLayout {
    fn default() -> Self {
        Self {
            good_dir: "good".to_string(),
            bad_dir: "bad".to_string(),
            extension: "json".to_string(),
        }
    }
}

/// Fixture paths per group, each sorted lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureSet {
    pub good: Vec<PathBuf>,
    pub bad: Vec<PathBuf>,
}

impl FixtureSet {
    pub fn len(&self) -> usize {
        self.good.len() + self.bad.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Enumerate the expect-valid and expect-invalid fixtures under `base`.
///
/// A missing group directory yields an empty group.
pub fn collect_fixtures(base: &Path, layout: &FixtureLayout) -> Result<FixtureSet> {
    Ok(FixtureSet {
        good: collect_group(&base.join(&layout.good_dir), &layout.extension)?,
        bad: collect_group(&base.join(&layout.bad_dir), &layout.extension)?,
    })
}

fn collect_group(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let read_err = |source: std::io::Error| FixtureError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let matches_extension = path
            .extension()
            .is_some_and(|value| value.to_string_lossy() == extension);
        if path.is_file() && matches_extension {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
