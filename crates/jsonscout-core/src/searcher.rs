//! Recursive directory search over parsed JSON documents.
//!
//! Walks a root directory, parses every file with the recognized
//! extension, and records which files contain each target substring in
//! an object key or string value, nested arbitrarily deep.

use std::fs;
use std::path::Path;

use serde_json::Value;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::report::{ParseFailure, SearchReport, Target};

pub const DEFAULT_EXTENSION: &str = "json";

pub struct TreeSearcher {
    extension: String,
}

impl Default for TreeSearcher {
    fn default() -> Self {
        Self { extension: DEFAULT_EXTENSION.to_string() }
    }
}

impl TreeSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension<S: Into<String>>(extension: S) -> Self {
        Self { extension: extension.into() }
    }

    /// Walk `root` and produce a match record per target.
    ///
    /// Fails up front if `root` is not a readable directory or `targets`
    /// is empty. A file that cannot be read or parsed is reported on
    /// stderr as it is encountered, recorded in the report, and excluded
    /// from every match record; the walk always continues.
    pub fn search(&self, root: &Path, targets: &[Target]) -> Result<SearchReport> {
        if targets.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one search target is required".to_string(),
            ));
        }
        if !root.is_dir() {
            return Err(Error::InvalidConfig(format!(
                "root directory {} does not exist or is not a directory",
                root.display()
            )));
        }
        // is_dir() only needs traversal perms on the parent; opening the
        // directory is what proves it is readable.
        fs::read_dir(root).map_err(|e| {
            Error::InvalidConfig(format!(
                "root directory {} is not readable: {}",
                root.display(),
                e
            ))
        })?;

        let mut report = SearchReport::new(targets);
        // Suffix match rather than Path::extension(): a file named
        // exactly ".json" has no extension but still ends with it.
        let suffix = format!(".{}", self.extension);
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Walk errors carry the offending path when known.
                    let path = e.path().unwrap_or(root).to_path_buf();
                    let reason = e.to_string();
                    eprintln!("Error reading {}: {}", path.display(), reason);
                    report.failures.push(ParseFailure { path, reason });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !entry.file_name().to_string_lossy().ends_with(&suffix) {
                continue;
            }

            report.files_scanned += 1;
            let document = match parse_file(path) {
                Ok(document) => document,
                Err(e) => {
                    eprintln!("{}", e);
                    let reason = match &e {
                        Error::Unreadable { reason, .. } | Error::Parse { reason, .. } => {
                            reason.clone()
                        }
                        Error::InvalidConfig(msg) => msg.clone(),
                    };
                    report.failures.push(ParseFailure { path: path.to_path_buf(), reason });
                    continue;
                }
            };

            for record in &mut report.matches {
                if matches_value(&document, record.target.as_str()) {
                    record.record(path.to_path_buf());
                }
            }
        }
        Ok(report)
    }
}

fn parse_file(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).map_err(|e| Error::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Whether `document` contains `target` as a literal, case-sensitive
/// substring of any object key or string value, at any depth.
///
/// Traversal is exhaustive and uses an explicit work stack rather than
/// call-stack recursion, so document depth is bounded only by heap.
pub fn matches_value(document: &Value, target: &str) -> bool {
    let mut found = false;
    let mut pending = vec![document];
    while let Some(value) = pending.pop() {
        match value {
            Value::Object(entries) => {
                for (key, child) in entries {
                    if key.contains(target) {
                        found = true;
                    }
                    pending.push(child);
                }
            }
            Value::Array(items) => pending.extend(items.iter()),
            Value::String(s) => {
                if s.contains(target) {
                    found = true;
                }
            }
            // Numbers, booleans and null never match.
            _ => {}
        }
    }
    found
}
