use clap::{ArgAction, Parser};
use marc::{config, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "marc")]
#[command(version)]
#[command(about = "Render a directory of markdown files into HTML")]
#[command(long_about = "\
Render a directory of markdown files into HTML

Every *.md file under SITE is rendered through a shared layout and written
next to itself as *.html. Files with other extensions are left alone.

Site structure:

  site/
  ├── base.tmpl          # Layout (optional, built-in layout otherwise)
  ├── index.md           # → index.html, URL \"\"
  ├── about.md           # → about.html
  └── posts/
      ├── index.md       # → posts/index.html, URL \"posts/\"
      └── hello.md       # → posts/hello.html

Front matter:

  ---
  title: Hello
  date: 2024-05-01
  ---

Pages are listed newest first by their date field (compared as text, so use
YYYY-MM-DD). Layouts are Tera templates with `page`, `pages` and
`dateformat(src=, dst=, input=)` available.

Referencing a front matter key a page does not have stops the build. Guard
optional keys in the layout:

  {{ page.meta.title | default(value=\"\") }}
  {% if page.meta.date %}{{ page.meta.date }}{% endif %}")]
struct Cli {
    /// Site root directory
    site: PathBuf,

    /// Load build settings from a TOML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("marc={level}")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        output::print_error(&*e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let build_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::BuildConfig::default(),
    };

    let report =
        generate::generate_with_progress(&cli.site, &build_config, output::print_page_written)?;
    output::print_generate_summary(&report);
    Ok(())
}
