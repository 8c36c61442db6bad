//! Problem instance corpus on disk
//!
//! Instance files are named `gen.<type>.<dim1>.<dim2>.<index>`; the type is
//! the group key. Each call to [`instances`] rescans the directory.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// One problem instance read from the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub path: PathBuf,
    pub text: String,
}

/// Build the file name pattern for one group key
fn name_pattern(group_key: i64) -> Result<Regex> {
    Regex::new(&format!(r"^gen\.{}\.[^.]+\.[^.]+\.[^.]+$", group_key))
        .context("Failed to build instance file name pattern")
}

/// List instance files for `group_key`, sorted by file name
pub fn instance_paths(dir: &Path, group_key: i64) -> Result<Vec<PathBuf>> {
    let pattern = name_pattern(group_key)?;
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read instances directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if pattern.is_match(name) && entry.path().is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Lazily read every instance of `group_key`; file contents are loaded on demand
pub fn instances(
    dir: &Path,
    group_key: i64,
) -> Result<impl Iterator<Item = Result<Instance>>> {
    let paths = instance_paths(dir, group_key)?;
    Ok(paths.into_iter().map(|path| {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read instance {}", path.display()))?;
        Ok(Instance { path, text })
    }))
}
