use clap::{Parser, Subcommand};
use mdwiki::build::Builder;
use mdwiki::config::WikiConfig;
use mdwiki::middleware::relative_links;
use mdwiki::{output, scaffold, watch};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Shared flags for commands that run a build.
#[derive(clap::Args, Clone)]
struct BuildArgs {
    /// Directory containing the wiki's source files
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Directory to put all rendered html into
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory containing document/listing templates (default: built-in)
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Rewrite absolute links to relative ones in the rendered html
    #[arg(long)]
    relative_links: bool,

    /// Open the generated site in a browser after building
    #[arg(long)]
    browser: bool,
}

#[derive(Parser)]
#[command(name = "mdwiki")]
#[command(about = "Compile a markdown wiki into a static HTML site")]
#[command(long_about = "\
Compile a markdown wiki into a static HTML site

Your filesystem is the wiki structure. Every markdown file becomes a page
with breadcrumb navigation; every directory becomes a listing page that
indexes the files and subdirectories beneath it:

  wiki/
  ├── home.md                →  _html/home.html
  ├── another_page.md        →  _html/another_page.html
  └── subdir/
      └── stuff.md           →  _html/subdir/stuff.html
                                _html/index.html         (root listing)
                                _html/subdir/index.html  (subdir listing)

Configuration comes from wiki.toml in the working directory (all keys
optional); command-line flags override it. A source file named index.md is
rejected — it would collide with the generated listing pages.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the wiki once
    Build(BuildArgs),
    /// Scaffold a new wiki at the given path
    Init { path: PathBuf },
    /// Build, then rebuild automatically on source changes
    Watch(BuildArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build(args) => {
            let builder = make_builder(&args)?;
            let written = builder.build()?;
            output::print_build_output(&written, &builder.config().output_dir);
            if args.browser {
                open_in_browser(&builder.config().output_dir.join("index.html"))?;
            }
            Ok(())
        }
        Command::Init { path } => {
            scaffold::init(&path)?;
            println!("New wiki created at {}", path.display());
            Ok(())
        }
        Command::Watch(args) => {
            let builder = make_builder(&args)?;
            let written = builder.build()?;
            output::print_build_output(&written, &builder.config().output_dir);
            watch::watch(&builder)?;
            Ok(())
        }
    }
}

/// Merge wiki.toml with command-line overrides and check the source exists.
fn make_builder(args: &BuildArgs) -> Result<Builder, Box<dyn std::error::Error>> {
    let mut config = WikiConfig::load(Path::new("."))?;
    if let Some(source_dir) = &args.source_dir {
        config.source_dir = source_dir.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(template_dir) = &args.template_dir {
        config.template_dir = Some(template_dir.clone());
    }

    if !config.source_dir.is_dir() {
        return Err(format!("No wiki found at {}", config.source_dir.display()).into());
    }

    let mut builder = Builder::new(config);
    if args.relative_links {
        builder = builder.with_middleware(Box::new(|link, html| relative_links(link, html)));
    }
    Ok(builder)
}

#[cfg(target_os = "macos")]
const BROWSER_OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const BROWSER_OPENER: &str = "xdg-open";

fn open_in_browser(index: &Path) -> std::io::Result<()> {
    std::process::Command::new(BROWSER_OPENER)
        .arg(index)
        .spawn()
        .map(|_| ())
}
