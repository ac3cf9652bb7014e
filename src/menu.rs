//! Menu generation for one configuration directory.
//!
//! Given a scanned source, lists its patterns and tabular-data directories,
//! filters the entries by convention, and writes two files under
//! `docs/configurations/<configName>/`:
//!
//! - `config.yaml` — the bundled stock table-editor configuration, copied
//!   verbatim the first time the directory is created
//! - `menu.yaml` — a `defaultPatterns:` / `defaultXSVs:` document of
//!   `{url, title}` entries pointing at raw file content
//!
//! Both files are write-once. An existing `menu.yaml` skips the whole
//! listing step: the tool is additive, not synchronizing, so hand edits
//! survive re-runs.
//!
//! Entries that do not match the conventions are excluded with a warning,
//! never an error: one stray README in a patterns directory must not sink
//! the run.

use crate::output;
use crate::source::ScannedSource;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("directory did not materialize after create: {}", .0.display())]
    DirNotCreated(PathBuf),
    #[error("file did not materialize after write: {}", .0.display())]
    FileNotWritten(PathBuf),
}

const CONFIG_TEMPLATE: &str = include_str!("../static/config.yaml");

/// One menu line: where to fetch a file and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub url: String,
    pub title: String,
}

/// The full `menu.yaml` content, two ordered lists.
#[derive(Debug)]
pub struct MenuDocument {
    pub default_patterns: Vec<MenuEntry>,
    pub default_xsvs: Vec<MenuEntry>,
}

/// Result of filtering one directory listing: kept relative paths plus the
/// warnings for everything excluded. Pure data so tests can assert on both.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<String>,
    pub warnings: Vec<String>,
}

/// List a patterns directory, keeping only `.yaml` files.
pub fn collect_patterns(dir: &Path) -> Result<Discovery, MenuError> {
    let mut discovery = Discovery::default();
    for entry in sorted_entries(dir)? {
        let name = entry_name(&entry);
        if entry.is_file() && extension(&entry).as_deref() == Some("yaml") {
            discovery.files.push(name);
        } else {
            discovery
                .warnings
                .push(format!("Skipping non-pattern entry: {}", entry.display()));
        }
    }
    Ok(discovery)
}

/// List a tabular-data directory.
///
/// `.csv` and `.tsv` files are kept directly. An extensionless entry is
/// treated as the subdirectory convention used by some module layouts:
/// `<entry>/<entry>.csv` is probed, then `<entry>/<entry>.tsv`, and the
/// relative path is kept when one exists. Everything else is skipped with
/// a warning.
pub fn collect_xsvs(dir: &Path) -> Result<Discovery, MenuError> {
    let mut discovery = Discovery::default();
    for entry in sorted_entries(dir)? {
        let name = entry_name(&entry);
        match extension(&entry).as_deref() {
            Some("csv") | Some("tsv") if entry.is_file() => discovery.files.push(name),
            None => match probe_nested_xsv(&entry, &name) {
                Some(relative) => discovery.files.push(relative),
                None => discovery.warnings.push(format!(
                    "Skipping {}: no {name}.csv or {name}.tsv inside",
                    entry.display()
                )),
            },
            _ => discovery
                .warnings
                .push(format!("Skipping non-tabular entry: {}", entry.display())),
        }
    }
    Ok(discovery)
}

/// Probe `<entry>/<entry>.csv` then `<entry>/<entry>.tsv`; return the
/// relative path of the first that exists.
fn probe_nested_xsv(entry: &Path, name: &str) -> Option<String> {
    ["csv", "tsv"]
        .iter()
        .find(|ext| entry.join(format!("{name}.{ext}")).is_file())
        .map(|ext| format!("{name}/{name}.{ext}"))
}

/// Title for a tabular entry.
///
/// Known special case, kept deliberately: for the nested `<dir>/<file>`
/// layout the title is the filename segment alone, because that is how one
/// particular ontology repository names its modules. Do not generalize
/// this into path mangling for other shapes.
pub fn xsv_title(relative: &str) -> &str {
    match relative.split_once('/') {
        Some((_, file)) => file,
        None => relative,
    }
}

/// Assemble the menu from the two discovery lists.
pub fn build(scanned: &ScannedSource, patterns: &[String], xsvs: &[String]) -> MenuDocument {
    let default_patterns = patterns
        .iter()
        .map(|file| MenuEntry {
            url: format!("{}{}/{}", scanned.raw_prefix, scanned.patterns_dir, file),
            title: file.clone(),
        })
        .collect();
    let default_xsvs = xsvs
        .iter()
        .map(|relative| MenuEntry {
            url: format!("{}{}/{}", scanned.raw_prefix, scanned.xsv_dir, relative),
            title: xsv_title(relative).to_string(),
        })
        .collect();
    MenuDocument {
        default_patterns,
        default_xsvs,
    }
}

/// Render the menu document as YAML text.
pub fn render(menu: &MenuDocument) -> String {
    let mut out = String::new();
    render_section(&mut out, "defaultPatterns", &menu.default_patterns);
    render_section(&mut out, "defaultXSVs", &menu.default_xsvs);
    out
}

fn render_section(out: &mut String, name: &str, entries: &[MenuEntry]) {
    if entries.is_empty() {
        out.push_str(&format!("{name}: []\n"));
        return;
    }
    out.push_str(&format!("{name}:\n"));
    for entry in entries {
        out.push_str(&format!("  - url: \"{}\"\n", entry.url));
        out.push_str(&format!("    title: \"{}\"\n", entry.title));
    }
}

/// Materialize `docs/configurations/<configName>/` for a scanned source:
/// the directory itself, the stock `config.yaml`, and a generated
/// `menu.yaml` — each only if not already present.
pub fn write_configuration(
    configurations_dir: &Path,
    scanned: &ScannedSource,
) -> Result<(), MenuError> {
    let config_dir = configurations_dir.join(&scanned.config_name);
    if config_dir.is_dir() {
        output::exists("configuration directory", &config_dir);
    } else {
        output::creating("configuration directory", &config_dir);
        fs::create_dir(&config_dir)?;
        if !config_dir.is_dir() {
            return Err(MenuError::DirNotCreated(config_dir));
        }
        output::created("configuration directory", &config_dir);
    }

    let config_file = config_dir.join("config.yaml");
    if config_file.is_file() {
        output::exists("config.yaml", &config_file);
    } else {
        output::creating("config.yaml", &config_file);
        fs::write(&config_file, CONFIG_TEMPLATE)?;
        if !config_file.is_file() {
            return Err(MenuError::FileNotWritten(config_file));
        }
        output::created("config.yaml", &config_file);
    }

    let menu_file = config_dir.join("menu.yaml");
    if menu_file.is_file() {
        // Existing menu wins; the source is not even listed.
        output::exists("menu.yaml", &menu_file);
        return Ok(());
    }

    output::creating("menu.yaml", &menu_file);
    let patterns = collect_patterns(&scanned.path.join(&scanned.patterns_dir))?;
    let xsvs = collect_xsvs(&scanned.path.join(&scanned.xsv_dir))?;
    for warning in patterns.warnings.iter().chain(&xsvs.warnings) {
        output::warn(warning);
    }

    let menu = build(scanned, &patterns.files, &xsvs.files);
    fs::write(&menu_file, render(&menu))?;
    if !menu_file.is_file() {
        return Err(MenuError::FileNotWritten(menu_file));
    }
    output::created("menu.yaml", &menu_file);
    Ok(())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, MenuError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    entries.sort();
    Ok(entries)
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scanned_fixture(path: &Path) -> ScannedSource {
        ScannedSource {
            config_name: "go-ontology".to_string(),
            path: path.to_path_buf(),
            raw_prefix: "https://raw.githubusercontent.com/org/repo/master/".to_string(),
            patterns_dir: "src/patterns".to_string(),
            xsv_dir: "src/ontology/modules".to_string(),
        }
    }

    fn populate_source(root: &Path) {
        let patterns = root.join("src/patterns");
        fs::create_dir_all(&patterns).unwrap();
        fs::write(patterns.join("a.yaml"), "pattern: a").unwrap();
        fs::write(patterns.join("b.txt"), "not a pattern").unwrap();
        fs::write(patterns.join("c.yaml"), "pattern: c").unwrap();

        let modules = root.join("src/ontology/modules");
        fs::create_dir_all(modules.join("bar")).unwrap();
        fs::create_dir_all(modules.join("baz")).unwrap();
        fs::write(modules.join("foo.csv"), "a,b").unwrap();
        fs::write(modules.join("bar/bar.tsv"), "a\tb").unwrap();
    }

    #[test]
    fn patterns_keep_only_yaml_in_order() {
        let tmp = TempDir::new().unwrap();
        populate_source(tmp.path());

        let discovery = collect_patterns(&tmp.path().join("src/patterns")).unwrap();
        assert_eq!(discovery.files, vec!["a.yaml", "c.yaml"]);
        assert_eq!(discovery.warnings.len(), 1);
        assert!(discovery.warnings[0].contains("b.txt"));
    }

    #[test]
    fn xsvs_follow_direct_and_nested_conventions() {
        let tmp = TempDir::new().unwrap();
        populate_source(tmp.path());

        let discovery = collect_xsvs(&tmp.path().join("src/ontology/modules")).unwrap();
        assert_eq!(discovery.files, vec!["bar/bar.tsv", "foo.csv"]);
        // baz/ has no baz.csv or baz.tsv inside
        assert_eq!(discovery.warnings.len(), 1);
        assert!(discovery.warnings[0].contains("baz"));
    }

    #[test]
    fn xsv_with_other_extension_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.md"), "x").unwrap();
        fs::write(tmp.path().join("data.csv"), "a,b").unwrap();

        let discovery = collect_xsvs(tmp.path()).unwrap();
        assert_eq!(discovery.files, vec!["data.csv"]);
        assert!(discovery.warnings[0].contains("notes.md"));
    }

    #[test]
    fn nested_probe_prefers_csv_over_tsv() {
        let tmp = TempDir::new().unwrap();
        let module = tmp.path().join("both");
        fs::create_dir(&module).unwrap();
        fs::write(module.join("both.csv"), "a,b").unwrap();
        fs::write(module.join("both.tsv"), "a\tb").unwrap();

        let discovery = collect_xsvs(tmp.path()).unwrap();
        assert_eq!(discovery.files, vec!["both/both.csv"]);
    }

    #[test]
    fn nested_xsv_title_is_filename_only() {
        assert_eq!(xsv_title("bar/bar.tsv"), "bar.tsv");
        assert_eq!(xsv_title("foo.csv"), "foo.csv");
    }

    #[test]
    fn build_joins_prefix_dir_and_file() {
        let tmp = TempDir::new().unwrap();
        let scanned = scanned_fixture(tmp.path());
        let menu = build(
            &scanned,
            &["a.yaml".to_string()],
            &["bar/bar.tsv".to_string()],
        );

        assert_eq!(
            menu.default_patterns[0].url,
            "https://raw.githubusercontent.com/org/repo/master/src/patterns/a.yaml"
        );
        assert_eq!(menu.default_patterns[0].title, "a.yaml");
        assert_eq!(
            menu.default_xsvs[0].url,
            "https://raw.githubusercontent.com/org/repo/master/src/ontology/modules/bar/bar.tsv"
        );
        assert_eq!(menu.default_xsvs[0].title, "bar.tsv");
    }

    #[test]
    fn render_emits_two_sections() {
        let menu = MenuDocument {
            default_patterns: vec![MenuEntry {
                url: "https://example.test/a.yaml".to_string(),
                title: "a.yaml".to_string(),
            }],
            default_xsvs: vec![],
        };
        let text = render(&menu);
        assert_eq!(
            text,
            "defaultPatterns:\n  - url: \"https://example.test/a.yaml\"\n    title: \"a.yaml\"\ndefaultXSVs: []\n"
        );
    }

    #[test]
    fn write_configuration_materializes_both_files() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("go-ontology");
        populate_source(&source);
        let configurations = tmp.path().join("configurations");
        fs::create_dir(&configurations).unwrap();

        write_configuration(&configurations, &scanned_fixture(&source)).unwrap();

        let config_dir = configurations.join("go-ontology");
        assert!(config_dir.join("config.yaml").is_file());
        let menu = fs::read_to_string(config_dir.join("menu.yaml")).unwrap();
        assert!(menu.contains("src/patterns/a.yaml"));
        assert!(menu.contains("src/ontology/modules/bar/bar.tsv"));
        assert!(!menu.contains("b.txt"));
    }

    #[test]
    fn existing_menu_and_config_are_never_overwritten() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("go-ontology");
        populate_source(&source);
        let configurations = tmp.path().join("configurations");
        fs::create_dir(&configurations).unwrap();
        let scanned = scanned_fixture(&source);

        write_configuration(&configurations, &scanned).unwrap();

        let config_dir = configurations.join("go-ontology");
        fs::write(config_dir.join("menu.yaml"), "hand edited\n").unwrap();
        fs::write(config_dir.join("config.yaml"), "hand edited\n").unwrap();

        write_configuration(&configurations, &scanned).unwrap();
        assert_eq!(
            fs::read_to_string(config_dir.join("menu.yaml")).unwrap(),
            "hand edited\n"
        );
        assert_eq!(
            fs::read_to_string(config_dir.join("config.yaml")).unwrap(),
            "hand edited\n"
        );
    }
}
