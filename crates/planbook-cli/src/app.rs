//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use planbook_core::{build, BookConfig, Document, PageKind, Preset};
use planbook_pdf::{render_pdf, write_pdf, AssetStore};

/// Built-in book layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    /// Tabletop campaign binder
    Campaign,
    /// Project index with notes, to-do and people pages per project
    ProjectNotes,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Campaign => Preset::Campaign,
            PresetArg::ProjectNotes => Preset::ProjectNotes,
        }
    }
}

/// Where a book configuration comes from
#[derive(Debug, Clone)]
pub enum BookSource {
    /// TOML file on disk
    Config(PathBuf),
    /// Built-in layout
    Preset(PresetArg),
}

impl BookSource {
    /// Read the configuration
    pub fn load(&self) -> Result<BookConfig> {
        match self {
            BookSource::Config(path) => BookConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display())),
            BookSource::Preset(preset) => Ok(Preset::from(*preset).config()),
        }
    }

    /// Directory image paths are relative to when `--assets` is not given
    pub fn base_dir(&self) -> PathBuf {
        match self {
            BookSource::Config(path) => path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            BookSource::Preset(_) => PathBuf::from("."),
        }
    }
}

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Asset root, defaults to [`BookSource::base_dir`]
    pub assets: Option<PathBuf>,
    /// Output file, defaults to the configured output name
    pub output: Option<PathBuf>,
    /// Extra font files
    pub fonts: Vec<PathBuf>,
}

#[derive(Parser)]
#[command(name = "planbook")]
#[command(author, version, about = "Printable planner PDFs with clickable navigation", long_about = None)]
struct Cli {
    /// Log every page as it is laid out
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Book configuration file (TOML)
    #[arg(short, long, conflicts_with = "preset", required_unless_present = "preset")]
    config: Option<PathBuf>,

    /// Built-in book layout
    #[arg(short, long, value_enum)]
    preset: Option<PresetArg>,
}

impl SourceArgs {
    fn into_source(self) -> Result<BookSource> {
        match (self.config, self.preset) {
            (Some(config), _) => Ok(BookSource::Config(config)),
            (None, Some(preset)) => Ok(BookSource::Preset(preset)),
            (None, None) => anyhow::bail!("Either --config or --preset is required"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a book and write it as PDF
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory image paths are relative to
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Font file for header and footer text (repeatable)
        #[arg(long = "font")]
        fonts: Vec<PathBuf>,
    },

    /// Print the page sequence and link targets without rendering
    Outline {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Write a built-in layout as an editable TOML file
    Init {
        /// Layout to start from
        #[arg(short, long, value_enum)]
        preset: PresetArg,

        /// Output TOML file
        #[arg(short, long, default_value = "planbook.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            source,
            assets,
            output,
            fonts,
        } => {
            let options = GenerateOptions {
                assets,
                output,
                fonts,
            };
            generate_command(&source.into_source()?, &options)?;
        }
        Commands::Outline { source } => {
            outline_command(&source.into_source()?)?;
        }
        Commands::Init {
            preset,
            output,
            force,
        } => {
            init_command(preset, &output, force)?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` still applies
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the generate command
///
/// Returns the path of the written PDF. Nothing is written unless the whole
/// book lays out and renders.
pub fn generate_command(source: &BookSource, options: &GenerateOptions) -> Result<PathBuf> {
    println!("planbook v{}", planbook_core::VERSION);

    let config = source.load()?;
    let book = config.validate().context("Invalid book configuration")?;
    println!("Generating: {}", book.title);

    let root = options.assets.clone().unwrap_or_else(|| source.base_dir());
    let assets = AssetStore::load(&root, book.assets())
        .with_context(|| format!("Failed to load images from {}", root.display()))?;
    println!("  {} images loaded", assets.len());

    let doc = build(&book).context("Failed to lay out book")?;
    println!("  {} pages, {} links", doc.len(), doc.links.len());

    let mut fonts: Vec<PathBuf> = book.fonts.iter().map(|f| root.join(f)).collect();
    fonts.extend(options.fonts.iter().cloned());

    let pdf = render_pdf(&doc, &assets, &fonts).context("Failed to render PDF")?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&book.output));
    write_pdf(&pdf, &output)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    println!("PDF generated: {}", output.display());
    Ok(output)
}

/// Execute the outline command
pub fn outline_command(source: &BookSource) -> Result<()> {
    let book = source
        .load()?
        .validate()
        .context("Invalid book configuration")?;
    let doc = build(&book).context("Failed to lay out book")?;

    println!("{}", doc.title);
    for line in outline_lines(&doc)? {
        println!("{}", line);
    }
    println!();
    println!("{} pages, {} links", doc.len(), doc.links.len());
    Ok(())
}

/// One line per page: number, kind, title and the pages its icons link to
pub fn outline_lines(doc: &Document) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(doc.len());
    for page in &doc.pages {
        let kind = match page.kind {
            PageKind::Cover => "cover",
            PageKind::Index { .. } => "index",
            PageKind::Content { .. } => "content",
        };

        let mut targets = Vec::new();
        for (_, link) in page.link_placements() {
            let target = doc
                .resolve(link)
                .with_context(|| format!("Broken link on page {}", page.number))?;
            targets.push(target.number.to_string());
        }

        let mut line = format!("{:>4}  {:<7}  {}", page.number, kind, page.title);
        if !targets.is_empty() {
            line.push_str(" -> ");
            line.push_str(&targets.join(", "));
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Execute the init command
pub fn init_command(preset: PresetArg, output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Output file already exists: {}\nUse --force to overwrite it.",
            output.display()
        );
    }

    let preset = Preset::from(preset);
    let toml = preset
        .config()
        .to_toml_string()
        .context("Failed to serialize preset")?;
    let content = format!(
        "# planbook configuration\n# Generated from preset: {}\n\n{}",
        preset.name(),
        toml
    );

    fs::write(output, content)
        .with_context(|| format!("Failed to write config file: {}", output.display()))?;
    println!("Created: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_preset_names_match_core() {
        for preset in Preset::ALL {
            let arg = PresetArg::from_str(preset.name(), false).unwrap();
            assert_eq!(Preset::from(arg), preset);
        }
    }

    #[test]
    fn test_generate_requires_a_source() {
        assert!(Cli::try_parse_from(["planbook", "generate"]).is_err());
        assert!(Cli::try_parse_from([
            "planbook",
            "generate",
            "--config",
            "a.toml",
            "--preset",
            "campaign"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["planbook", "generate", "--preset", "project-notes"]).is_ok());
    }

    #[test]
    fn test_fonts_are_repeatable() {
        let cli = Cli::try_parse_from([
            "planbook",
            "generate",
            "-p",
            "campaign",
            "--font",
            "a.ttf",
            "--font",
            "b.ttf",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { fonts, .. } => assert_eq!(fonts.len(), 2),
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_base_dir_follows_config_file() {
        let source = BookSource::Config(PathBuf::from("books/notes.toml"));
        assert_eq!(source.base_dir(), PathBuf::from("books"));
        let bare = BookSource::Config(PathBuf::from("notes.toml"));
        assert_eq!(bare.base_dir(), PathBuf::from("."));
        assert_eq!(
            BookSource::Preset(PresetArg::Campaign).base_dir(),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_outline_lines_show_link_targets() {
        let book = BookConfig::from_toml_str(
            r#"
[[sections]]
title = "Story"
icon = "icons/story.png"
pages = 2
"#,
        )
        .unwrap()
        .validate()
        .unwrap();
        let doc = build(&book).unwrap();
        let lines = outline_lines(&doc).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "   1  content  Story -> 1");
        assert_eq!(lines[1], "   2  content  Story -> 1");
    }
}
