//! Colored terminal reporting.
//!
//! Every ensure-X step in the pipeline prints exactly one status line:
//! green when the artifact already exists, yellow when it is about to be
//! created, green again once creation is verified. Skipped directory
//! entries are yellow warnings; the single fatal diagnostic `main` prints
//! before exiting is red.
//!
//! Format functions are pure and return plain strings; the printing
//! wrappers add color and do the I/O, so tests can assert on message text
//! without capturing stdout.

use colored::Colorize;
use std::path::Path;

/// Format one status line: `docs/ exists: /path/to/site/docs`.
pub fn format_status(what: &str, state: &str, path: &Path) -> String {
    format!("{what} {state}: {}", path.display())
}

/// Green line for an artifact that is already in place.
pub fn exists(what: &str, path: &Path) {
    println!("{}", format_status(what, "exists", path).green());
}

/// Yellow line announcing an artifact about to be created.
pub fn creating(what: &str, path: &Path) {
    println!("{}", format_status(what, "will be created", path).yellow());
}

/// Green line confirming a verified creation.
pub fn created(what: &str, path: &Path) {
    println!("{}", format_status(what, "created", path).green());
}

/// Yellow warning for a directory entry excluded from the menu.
pub fn warn(message: &str) {
    eprintln!("{}", message.yellow());
}

/// Red diagnostic printed once before the process terminates.
pub fn fatal(message: &str) {
    eprintln!("{}", format!("error: {message}").red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_names_the_path() {
        let line = format_status("index.json", "exists", Path::new("/tmp/site/index.json"));
        assert_eq!(line, "index.json exists: /tmp/site/index.json");
    }
}
