//! # tetool
//!
//! Bootstraps documentation sites for the ontology-pattern table editor.
//! Point it at a site root and it guarantees the `docs/` skeleton the
//! front-end expects; point it at ontology repository checkouts and it
//! generates a browsable configuration for each one.
//!
//! # Architecture: One Linear Pass
//!
//! Each invocation is a single synchronous pipeline:
//!
//! ```text
//! 1. Site init     --site       →  docs/, configurations/, logo, index.html, index.json
//! 2. Source scan   --source ×N  →  raw URL prefix + patterns/XSV directories per source
//! 3. Menu gen      per source   →  configurations/<name>/{config.yaml, menu.yaml}
//! 4. Index update  at the end   →  index.json rewritten with all config names
//! ```
//!
//! Every file except the final `index.json` rewrite is create-if-absent, so
//! repeated runs are harmless and hand edits to generated files survive. A
//! failed precondition (missing site root, unrecognized remote, no patterns
//! directory) aborts the whole run through a single fatal path; a stray
//! file that merely breaks a naming convention is skipped with a warning.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | Site skeleton creation and the persisted `index.json` (`SiteIndex`) |
//! | [`source`] | Per-source validation, git remote → raw-URL rewrite, layout-convention tables |
//! | [`menu`] | Directory filtering and `menu.yaml` / `config.yaml` emission |
//! | [`mode`] | Hosted vs. local serving, resolved once at startup |
//! | [`output`] | Colored exists/create/warn/fatal reporting |
//!
//! The tool never fetches the URLs it writes and never parses the YAML and
//! CSV content it lists; it only decides where files live and records how
//! to reach them.

pub mod menu;
pub mod mode;
pub mod output;
pub mod site;
pub mod source;
