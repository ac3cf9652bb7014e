//! Site initialization and the persisted site index.
//!
//! First half of the tetool pipeline. Given a site root, guarantees the
//! on-disk skeleton the table editor expects:
//!
//! ```text
//! <siteRoot>/
//! └── docs/
//!     ├── INCA.png                 # default logo, copied once
//!     ├── index.html               # rendered once from the bundled template
//!     ├── <basename> → .           # symlink, local mode only
//!     └── configurations/
//!         └── index.json           # SiteIndex document
//! ```
//!
//! Every step is create-if-absent: nothing here overwrites an existing
//! file, and an `index.json` found on disk is authoritative — its title,
//! logo, and config list win over anything derivable from the current
//! invocation. The one exception is [`save_index`], which always rewrites
//! `index.json` after the configuration list has been updated.
//!
//! Each creation is re-verified immediately afterwards; a path that still
//! does not exist after a successful-looking write is a fatal error.

use crate::mode::Mode;
use crate::output;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("site root directory does not exist: {}", .0.display())]
    MissingRoot(PathBuf),
    #[error("directory did not materialize after create: {}", .0.display())]
    DirNotCreated(PathBuf),
    #[error("file did not materialize after write: {}", .0.display())]
    FileNotWritten(PathBuf),
}

const DEFAULT_LOGO: &[u8] = include_bytes!("../static/INCA.png");
const INDEX_HTML_TEMPLATE: &str = include_str!("../static/index.html");

/// Default logo filename, referenced by `index.json` and the favicon link.
pub const DEFAULT_LOGO_NAME: &str = "INCA.png";

/// The `docs/configurations/index.json` document the front-end loads first.
///
/// Field names follow the wire format the table editor already consumes,
/// hence the camelCase renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteIndex {
    /// Known configuration names, insertion-ordered, no duplicates.
    #[serde(rename = "configNames")]
    pub config_names: Vec<String>,
    #[serde(rename = "logoImage")]
    pub logo_image: String,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub title: String,
}

impl SiteIndex {
    fn new(title: String, base_url: String) -> SiteIndex {
        SiteIndex {
            config_names: Vec::new(),
            logo_image: DEFAULT_LOGO_NAME.to_string(),
            base_url,
            title,
        }
    }

    /// Set-like insert: append `name` if absent, preserving existing order.
    /// Returns whether the list changed.
    pub fn insert_config(&mut self, name: &str) -> bool {
        if self.config_names.iter().any(|n| n == name) {
            return false;
        }
        self.config_names.push(name.to_string());
        true
    }
}

/// An initialized site: resolved paths plus the in-memory [`SiteIndex`],
/// accumulated across the source loop and flushed once by [`save_index`].
pub struct Site {
    pub root: PathBuf,
    pub docs_dir: PathBuf,
    pub configurations_dir: PathBuf,
    pub index_file: PathBuf,
    pub basename: String,
    pub index: SiteIndex,
}

/// Ensure the full docs skeleton exists under `root` and load or create the
/// site index.
pub fn init(root: &Path, title: Option<&str>, mode: &Mode) -> Result<Site, SiteError> {
    if !root.is_dir() {
        return Err(SiteError::MissingRoot(root.to_path_buf()));
    }

    let basename = site_basename(root)?;
    let docs_dir = root.join("docs");
    let configurations_dir = docs_dir.join("configurations");

    ensure_dir("docs/", &docs_dir)?;
    ensure_dir("configurations/", &configurations_dir)?;

    let index_file = configurations_dir.join("index.json");
    let index = load_or_create_index(&index_file, &basename, title, mode)?;

    // The default logo is always materialized, even when index.json points
    // at a different logoImage.
    let logo_file = docs_dir.join(DEFAULT_LOGO_NAME);
    if logo_file.is_file() {
        output::exists("default logo", &logo_file);
    } else {
        output::creating("default logo", &logo_file);
        fs::write(&logo_file, DEFAULT_LOGO)?;
        verify_file(&logo_file)?;
        output::created("default logo", &logo_file);
    }

    let index_html = docs_dir.join("index.html");
    if index_html.is_file() {
        output::exists("index.html", &index_html);
    } else {
        output::creating("index.html", &index_html);
        let html = render_index_html(&index.title, &index.base_url, mode.js_include());
        fs::write(&index_html, html)?;
        verify_file(&index_html)?;
        output::created("index.html", &index_html);
    }

    if mode.wants_docs_symlink() {
        ensure_docs_symlink(&docs_dir, &basename)?;
    }

    Ok(Site {
        root: root.to_path_buf(),
        docs_dir,
        configurations_dir,
        index_file,
        basename,
        index,
    })
}

/// Persist the site index, pretty-printed. The only unconditional overwrite
/// in the tool.
pub fn save_index(site: &Site) -> Result<(), SiteError> {
    let json = serde_json::to_string_pretty(&site.index)?;
    fs::write(&site.index_file, json)?;
    verify_file(&site.index_file)?;
    output::created("index.json", &site.index_file);
    Ok(())
}

/// Final path segment of the site root, via canonicalization so `.` and
/// trailing slashes resolve to a real name.
fn site_basename(root: &Path) -> Result<String, SiteError> {
    let canonical = root.canonicalize()?;
    Ok(canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "site".to_string()))
}

fn load_or_create_index(
    index_file: &Path,
    basename: &str,
    title: Option<&str>,
    mode: &Mode,
) -> Result<SiteIndex, SiteError> {
    if index_file.is_file() {
        output::exists("index.json", index_file);
        let content = fs::read_to_string(index_file)?;
        return Ok(serde_json::from_str(&content)?);
    }

    output::creating("index.json", index_file);
    let title = title.unwrap_or(basename).to_string();
    let index = SiteIndex::new(title, mode.base_url(basename));
    fs::write(index_file, serde_json::to_string_pretty(&index)?)?;
    verify_file(index_file)?;
    output::created("index.json", index_file);
    Ok(index)
}

fn render_index_html(title: &str, base_url: &str, js_include: &str) -> String {
    INDEX_HTML_TEMPLATE
        .replace("${title}", title)
        .replace("${baseURL}", base_url)
        .replace("${tableEditorJSInclude}", js_include)
}

/// Create a directory if missing, then re-verify it exists.
fn ensure_dir(what: &str, path: &Path) -> Result<(), SiteError> {
    if path.is_dir() {
        output::exists(what, path);
        return Ok(());
    }
    output::creating(what, path);
    fs::create_dir(path)?;
    if !path.is_dir() {
        return Err(SiteError::DirNotCreated(path.to_path_buf()));
    }
    output::created(what, path);
    Ok(())
}

/// Post-write double check; a write that reported success but left no file
/// behind is fatal.
fn verify_file(path: &Path) -> Result<(), SiteError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(SiteError::FileNotWritten(path.to_path_buf()))
    }
}

/// `docs/<basename>` → `.`, so one local static server can reach both the
/// generated site and the source tree behind it.
#[cfg(unix)]
fn ensure_docs_symlink(docs_dir: &Path, basename: &str) -> Result<(), SiteError> {
    let link = docs_dir.join(basename);
    // symlink_metadata: a link pointing at `.` would satisfy exists() too,
    // but a dangling one would not.
    if link.symlink_metadata().is_ok() {
        output::exists("docs symlink", &link);
        return Ok(());
    }
    output::creating("docs symlink", &link);
    std::os::unix::fs::symlink(".", &link)?;
    output::created("docs symlink", &link);
    Ok(())
}

#[cfg(not(unix))]
fn ensure_docs_symlink(docs_dir: &Path, basename: &str) -> Result<(), SiteError> {
    output::warn(&format!(
        "Skipping docs symlink (not supported on this platform): {}",
        docs_dir.join(basename).display()
    ));
    Ok(())
}
