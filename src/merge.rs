//! Offline merge of exported issue files with last-write-wins dedup.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::Pattern;
use jiraq_api::Issue;
use tracing::warn;
use walkdir::WalkDir;

/// Merges every issue file matching the pattern under `dir` into one
/// deduplicated set. Zero matching files is fatal; a file that fails to
/// load or parse is skipped with a warning while the rest still merge.
pub fn merge_directory(dir: &Path, pattern: &str, recursive: bool) -> Result<Vec<Issue>> {
    let files = find_issue_files(dir, pattern, recursive).context("failed to find JSON files")?;

    if files.is_empty() {
        bail!(
            "no JSON files found matching pattern '{}' in '{}'",
            pattern,
            dir.display()
        );
    }

    Ok(merge_issues(load_sources(&files)))
}

/// Loads each file in order, skipping unreadable or malformed ones with a
/// warning. One bad file never blocks the others.
fn load_sources(files: &[PathBuf]) -> Vec<Vec<Issue>> {
    let mut sources = Vec::with_capacity(files.len());
    for file in files {
        match load_issues(file) {
            Ok(issues) => sources.push(issues),
            Err(err) => warn!("failed to load {}: {err:#}", file.display()),
        }
    }
    sources
}

/// Merges issue lists from multiple sources into one deduplicated set.
/// Sources are consumed in the order supplied, issues in file order; a key
/// already seen is replaced only when the incoming issue's `updated`
/// timestamp is strictly later. Output order is unspecified.
pub fn merge_issues<I>(sources: I) -> Vec<Issue>
where
    I: IntoIterator<Item = Vec<Issue>>,
{
    let mut by_key: HashMap<String, Issue> = HashMap::new();

    for issues in sources {
        for issue in issues {
            match by_key.entry(issue.key.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(issue);
                }
                Entry::Occupied(mut slot) => {
                    if is_newer(&issue, slot.get()) {
                        slot.insert(issue);
                    }
                }
            }
        }
    }

    by_key.into_values().collect()
}

/// An issue with no `updated` value never wins; one with a value always
/// beats an incumbent without one.
fn is_newer(incoming: &Issue, held: &Issue) -> bool {
    match (incoming.fields.updated, held.fields.updated) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(a), Some(b)) => a > b,
    }
}

/// Finds files whose name matches the glob pattern under `dir`, optionally
/// descending into subdirectories. Results are sorted for stable output.
pub fn find_issue_files(dir: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let matcher = Pattern::new(pattern)
        .with_context(|| format!("invalid file pattern '{pattern}'"))?;

    let mut files = Vec::new();
    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry.with_context(|| format!("failed to read '{}'", dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if matcher.matches(&entry.file_name().to_string_lossy()) {
                files.push(entry.into_path());
            }
        }
    } else {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read directory '{}'", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if matcher.matches(&entry.file_name().to_string_lossy()) {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Loads one exported issue file: a JSON array of issues in wire format.
pub fn load_issues(path: &Path) -> Result<Vec<Issue>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let issues = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;
    Ok(issues)
}
