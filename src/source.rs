//! Ontology source scanning.
//!
//! Second half of the pipeline. A `--source <path>[@<branch>]` argument
//! names a git working copy of an ontology repository; this module
//! validates it, derives the raw-content URL prefix every menu entry will
//! point at, and locates the two conventional content subdirectories.
//!
//! ## Layout conventions
//!
//! Ontology repositories have gone through several layout generations, so
//! both subdirectories are resolved against an ordered candidate table,
//! first match wins:
//!
//! - patterns: `src/patterns`, `patterns`, `src/ontology/patterns`
//! - tabular (XSV) data: `src/ontology/modules`, `patterns`
//!
//! A source matching none of the candidates for either table is fatal.
//!
//! ## Raw prefix derivation
//!
//! The remote URL is read by running `git ls-remote --get-url` inside the
//! source (the one external command tetool runs) and rewritten into a
//! `https://raw.githubusercontent.com/<org>/<repo>/<branch>/` prefix. This
//! is a best-effort string rewrite that assumes GitHub conventions, not a
//! general URL parser. In local mode the remote is never consulted and the
//! fixed local-server prefix is used instead.

use crate::mode::Mode;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("source is not under git version control (no .git): {}", .0.display())]
    NotAGitRepository(PathBuf),
    #[error("git ls-remote --get-url failed in {}", .0.display())]
    RemoteCommand(PathBuf),
    #[error("remote URL is not a recognizable GitHub repository: {0}")]
    UnrecognizedRemote(String),
    #[error("no patterns directory found under {} (tried {})", .0.display(), PATTERN_DIR_CANDIDATES.join(", "))]
    NoPatternsDir(PathBuf),
    #[error("no tabular data directory found under {} (tried {})", .0.display(), XSV_DIR_CANDIDATES.join(", "))]
    NoXsvDir(PathBuf),
}

/// Candidate locations for pattern files, newest layout first.
pub const PATTERN_DIR_CANDIDATES: &[&str] = &["src/patterns", "patterns", "src/ontology/patterns"];

/// Candidate locations for tabular (`.csv`/`.tsv`) files.
pub const XSV_DIR_CANDIDATES: &[&str] = &["src/ontology/modules", "patterns"];

/// One `--source` argument, split into path and branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub branch: String,
}

impl SourceSpec {
    /// Parse a `<path>[@<branch>]` token. A missing branch falls back to
    /// `default_branch` (the `--default-branch` flag).
    pub fn parse(token: &str, default_branch: &str) -> SourceSpec {
        match token.rsplit_once('@') {
            Some((path, branch)) if !branch.is_empty() => SourceSpec {
                path: PathBuf::from(path),
                branch: branch.to_string(),
            },
            // A bare trailing `@` means "default branch", same as no suffix.
            Some((path, _)) => SourceSpec {
                path: PathBuf::from(path),
                branch: default_branch.to_string(),
            },
            None => SourceSpec {
                path: PathBuf::from(token),
                branch: default_branch.to_string(),
            },
        }
    }
}

/// Everything the menu generator needs to know about one scanned source.
#[derive(Debug, Clone)]
pub struct ScannedSource {
    /// Basename of the source path; becomes the configuration name.
    pub config_name: String,
    pub path: PathBuf,
    /// URL prefix for raw file content, always ending in `/`.
    pub raw_prefix: String,
    /// Patterns directory, relative to the source root.
    pub patterns_dir: String,
    /// Tabular data directory, relative to the source root.
    pub xsv_dir: String,
}

/// Validate a source and resolve its URL prefix and content directories.
pub fn scan(spec: &SourceSpec, mode: &Mode) -> Result<ScannedSource, SourceError> {
    if !spec.path.is_dir() {
        return Err(SourceError::NotADirectory(spec.path.clone()));
    }
    if !spec.path.join(".git").exists() {
        return Err(SourceError::NotAGitRepository(spec.path.clone()));
    }

    let raw_prefix = match mode.raw_prefix_override() {
        Some(local) => local.to_string(),
        None => raw_prefix(&read_remote_url(&spec.path)?, &spec.branch)?,
    };

    let patterns_dir = resolve_candidate(&spec.path, PATTERN_DIR_CANDIDATES)
        .ok_or_else(|| SourceError::NoPatternsDir(spec.path.clone()))?;
    let xsv_dir = resolve_candidate(&spec.path, XSV_DIR_CANDIDATES)
        .ok_or_else(|| SourceError::NoXsvDir(spec.path.clone()))?;

    let config_name = config_name(&spec.path)?;

    Ok(ScannedSource {
        config_name,
        path: spec.path.clone(),
        raw_prefix,
        patterns_dir: patterns_dir.to_string(),
        xsv_dir: xsv_dir.to_string(),
    })
}

/// First candidate that exists as a directory under `root`.
fn resolve_candidate<'a>(root: &Path, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|candidate| root.join(candidate).is_dir())
}

/// Basename of the source path, canonicalized so `.` and trailing slashes
/// still yield a usable configuration name.
fn config_name(path: &Path) -> Result<String, SourceError> {
    let canonical = path.canonicalize()?;
    Ok(canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "source".to_string()))
}

/// Ask git for the configured remote URL of a working copy.
fn read_remote_url(path: &Path) -> Result<String, SourceError> {
    let output = Command::new("git")
        .args(["ls-remote", "--get-url"])
        .current_dir(path)
        .output()?;
    if !output.status.success() {
        return Err(SourceError::RemoteCommand(path.to_path_buf()));
    }
    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if url.is_empty() {
        return Err(SourceError::RemoteCommand(path.to_path_buf()));
    }
    Ok(url)
}

/// Rewrite a GitHub remote reference into a raw-content prefix.
///
/// Accepts the SSH form (`git@github.com:org/repo.git`) and the HTTPS form
/// (`https://github.com/org/repo`, optional `.git` or trailing slash);
/// anything else is an error.
///
/// ```
/// # use tetool::source::raw_prefix;
/// let prefix = raw_prefix("git@github.com:org/repo.git", "dev").unwrap();
/// assert_eq!(prefix, "https://raw.githubusercontent.com/org/repo/dev/");
/// ```
pub fn raw_prefix(remote: &str, branch: &str) -> Result<String, SourceError> {
    let remote = remote.trim();
    let org_repo = remote
        .strip_prefix("git@github.com:")
        .or_else(|| remote.strip_prefix("https://github.com/"))
        .or_else(|| remote.strip_prefix("http://github.com/"))
        .ok_or_else(|| SourceError::UnrecognizedRemote(remote.to_string()))?;
    let org_repo = org_repo.trim_end_matches('/');
    let org_repo = org_repo.strip_suffix(".git").unwrap_or(org_repo);
    if org_repo.split('/').filter(|s| !s.is_empty()).count() != 2 {
        return Err(SourceError::UnrecognizedRemote(remote.to_string()));
    }
    Ok(format!(
        "https://raw.githubusercontent.com/{org_repo}/{branch}/"
    ))
}
