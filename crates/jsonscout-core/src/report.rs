//! Domain types produced by a search run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A validated search string.
///
/// An empty string would trivially match every string value, so
/// construction rejects it instead of replicating that footgun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Target(String);

impl Target {
    pub fn new<S: Into<String>>(value: S) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::InvalidConfig(
                "search target must be a non-empty string".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Target {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The match record for one target: file paths in discovery order,
/// each path present at most once no matter how often the target
/// occurs inside the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMatches {
    pub target: Target,
    pub paths: Vec<PathBuf>,
}

impl TargetMatches {
    pub fn new(target: Target) -> Self {
        Self { target, paths: Vec::new() }
    }

    /// Append `path` unless it is already recorded.
    pub fn record(&mut self, path: PathBuf) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// A file that could not be read or parsed. Such files never appear
/// in any match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// The result of one search run.
///
/// - `matches`: one record per target, in target declaration order
/// - `failures`: unreadable/unparsable files, in discovery order
/// - `files_scanned`: files with the recognized extension that were opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub matches: Vec<TargetMatches>,
    pub failures: Vec<ParseFailure>,
    pub files_scanned: usize,
}

impl SearchReport {
    pub fn new(targets: &[Target]) -> Self {
        Self {
            matches: targets.iter().cloned().map(TargetMatches::new).collect(),
            failures: Vec::new(),
            files_scanned: 0,
        }
    }

    /// Look up the match record for a target string.
    pub fn matches_for(&self, target: &str) -> Option<&TargetMatches> {
        self.matches.iter().find(|m| m.target.as_str() == target)
    }

    pub fn failure_for(&self, path: &Path) -> Option<&ParseFailure> {
        self.failures.iter().find(|f| f.path == path)
    }
}
