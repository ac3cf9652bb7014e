//! Hosted/local site-mode selection.
//!
//! The tool serves two audiences: publishing a site through GitHub Pages
//! (hosted) and iterating against a dev server on localhost (local). Every
//! difference between the two — base URL shape, which table-editor bundle
//! `index.html` pulls in, where raw file content is fetched from, and whether
//! the docs symlink is laid down — is resolved here, once, at startup.
//! Nothing downstream branches on a `--local` flag.

/// Hosted table-editor bundle, served from the front-end's GitHub Pages.
const HOSTED_JS_INCLUDE: &str =
    r#"<script src="https://incatools.github.io/table-editor/bundle.js" type="text/javascript"></script>"#;

/// Bundle served by a local `npm run dev` of the table editor.
const LOCAL_JS_INCLUDE: &str =
    r#"<script src="http://localhost:8080/bundle.js" type="text/javascript"></script>"#;

/// Where a local static server exposes the source trees (see the docs
/// symlink in [`crate::site`]). Replaces the raw-GitHub prefix entirely.
const LOCAL_RAW_PREFIX: &str = "http://localhost:8000/";

/// How the generated site will be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// GitHub Pages: site under `/<repo>/`, content from raw.githubusercontent.com.
    Hosted,
    /// Local dev server: site at `/`, content from localhost.
    Local,
}

impl Mode {
    pub fn from_flag(local: bool) -> Mode {
        if local { Mode::Local } else { Mode::Hosted }
    }

    /// Base URL baked into `index.html` and `index.json` on first run.
    ///
    /// GitHub Pages serves a project site under `/<repo>/`; a local server
    /// serves from the root.
    pub fn base_url(&self, site_basename: &str) -> String {
        match self {
            Mode::Hosted => format!("/{site_basename}/"),
            Mode::Local => "/".to_string(),
        }
    }

    /// Script tag substituted for `${tableEditorJSInclude}` in the template.
    pub fn js_include(&self) -> &'static str {
        match self {
            Mode::Hosted => HOSTED_JS_INCLUDE,
            Mode::Local => LOCAL_JS_INCLUDE,
        }
    }

    /// In local mode the git remote is never consulted; this fixed prefix
    /// stands in for it.
    pub fn raw_prefix_override(&self) -> Option<&'static str> {
        match self {
            Mode::Hosted => None,
            Mode::Local => Some(LOCAL_RAW_PREFIX),
        }
    }

    /// Local serving wants `docs/<basename>` → `.` so one static server can
    /// reach both the generated site and the source tree behind it.
    pub fn wants_docs_symlink(&self) -> bool {
        matches!(self, Mode::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosted_base_url_is_project_path() {
        assert_eq!(Mode::Hosted.base_url("mysite"), "/mysite/");
    }

    #[test]
    fn local_base_url_is_root() {
        assert_eq!(Mode::Local.base_url("mysite"), "/");
    }

    #[test]
    fn local_overrides_raw_prefix() {
        assert_eq!(Mode::Hosted.raw_prefix_override(), None);
        assert_eq!(
            Mode::Local.raw_prefix_override(),
            Some("http://localhost:8000/")
        );
    }

    #[test]
    fn js_includes_differ_by_mode() {
        assert!(Mode::Hosted.js_include().contains("github.io"));
        assert!(Mode::Local.js_include().contains("localhost"));
    }
}
