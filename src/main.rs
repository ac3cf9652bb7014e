use clap::Parser;
use std::path::PathBuf;
use tetool::mode::Mode;
use tetool::source::SourceSpec;
use tetool::{menu, output, site, source};

#[derive(Parser)]
#[command(name = "tetool")]
#[command(about = "Bootstrap a documentation site for the ontology table editor")]
#[command(long_about = "\
Bootstrap a documentation site for the ontology table editor

Given a site root, tetool creates the docs/ tree the table-editor front-end
reads, then builds one browsable configuration per --source repository:

  <siteRoot>/
  └── docs/
      ├── INCA.png                     # default logo
      ├── index.html                   # loads the table-editor bundle
      └── configurations/
          ├── index.json               # site title, base URL, config names
          └── go-ontology/             # one per --source
              ├── config.yaml          # stock editor configuration
              └── menu.yaml            # pattern + tabular file menu

Sources are git checkouts of ontology repositories. Pattern (.yaml) files
are found under src/patterns, patterns, or src/ontology/patterns; tabular
(.csv/.tsv) files under src/ontology/modules or patterns. Menu entries
point at raw.githubusercontent.com for the source's remote and branch.

Every generated file is created only if absent, so re-running is safe and
hand edits win. Only index.json's configuration list is rewritten each run.")]
#[command(version)]
struct Cli {
    /// Site root directory (must already exist)
    #[arg(long)]
    site: PathBuf,

    /// Site title; defaults to the site root's directory name
    #[arg(long)]
    title: Option<String>,

    /// Ontology repository to scan, as <path>[@<branch>]; repeatable
    #[arg(long = "source", value_name = "PATH[@BRANCH]")]
    sources: Vec<String>,

    /// Target a local dev server instead of GitHub Pages and raw GitHub URLs
    #[arg(long)]
    local: bool,

    /// Branch assumed for sources without an @<branch> suffix
    #[arg(long, default_value = "master")]
    default_branch: String,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        output::fatal(&err.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mode = Mode::from_flag(cli.local);
    let mut site = site::init(&cli.site, cli.title.as_deref(), &mode)?;

    for token in &cli.sources {
        let spec = SourceSpec::parse(token, &cli.default_branch);
        let scanned = source::scan(&spec, &mode)?;
        menu::write_configuration(&site.configurations_dir, &scanned)?;
        site.index.insert_config(&scanned.config_name);
    }

    site::save_index(&site)?;
    Ok(())
}
