//! richdoc CLI - rich-text document rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use richdoc::render::{self, excerpt, RenderStats};
use richdoc::{
    parse_file_with_options, parse_reader_with_options, CleanupPreset, ConvertOptions,
    DocumentParser, DocumentRenderer, DocumentTree, JsonFormat, OutputFormat, ParseOptions,
    RenderOptions, WriterRegistry,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "richdoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render rich-text editor documents to HTML, Markdown, text, and JSON", long_about = None)]
struct Cli {
    /// Input document (JSON), or "-" for stdin
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Default)]
struct CommonArgs {
    /// Read non-JSON input as plain-text paragraphs instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Base URL prepended to relative image sources
    #[arg(long, global = true, env = "RICHDOC_IMAGE_BASE_URL", value_name = "URL")]
    image_base_url: Option<String>,

    /// Drop nodes nested deeper than this
    #[arg(long, global = true, env = "RICHDOC_MAX_DEPTH", value_name = "N")]
    max_depth: Option<usize>,

    /// JSON Pointer selecting the document inside each record (e.g. /description)
    #[arg(long, global = true, value_name = "POINTER")]
    pointer: Option<String>,
}

impl CommonArgs {
    fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new();
        if self.lenient {
            options = options.lenient();
        }
        if let Some(ref pointer) = self.pointer {
            options = options.with_pointer(pointer);
        }
        options
    }

    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::new();
        if let Some(ref url) = self.image_base_url {
            options = options.with_image_base_url(url);
        }
        if let Some(depth) = self.max_depth {
            options = options.with_max_depth(depth);
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render to every format (HTML, Markdown, text, JSON) in a directory
    Convert {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,
    },

    /// Render to HTML
    Html {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit inline font sizes on headings
        #[arg(long)]
        heading_sizes: bool,
    },

    /// Render to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,
    },

    /// Render to plain text
    Text {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Print a single-line excerpt of at most N characters
        #[arg(long, value_name = "N")]
        excerpt: Option<usize>,
    },

    /// Render to JSON fragments
    Json {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document statistics
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Render many documents in parallel
    Batch {
        /// A JSON array file, or a directory of .json files
        #[arg(value_name = "PATH")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: FormatArg,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Everything on one line (meta descriptions)
    SingleLine,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::SingleLine => CleanupPreset::SingleLine,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Html,
    Markdown,
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let common = cli.common;

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            cleanup,
        }) => cmd_convert(&input, output.as_deref(), cleanup, &common),
        Some(Commands::Html {
            input,
            output,
            heading_sizes,
        }) => cmd_html(&input, output.as_deref(), heading_sizes, &common),
        Some(Commands::Markdown {
            input,
            output,
            cleanup,
            max_heading,
        }) => cmd_markdown(&input, output.as_deref(), cleanup, max_heading, &common),
        Some(Commands::Text {
            input,
            output,
            cleanup,
            excerpt,
        }) => cmd_text(&input, output.as_deref(), cleanup, excerpt, &common),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &common),
        Some(Commands::Info { input }) => cmd_info(&input, &common),
        Some(Commands::Batch {
            input,
            output,
            format,
        }) => cmd_batch(&input, &output, format.into(), &common),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), None, &common)
            } else {
                println!("{}", "Usage: richdoc <FILE> [OUTPUT]".yellow());
                println!("       richdoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load a document from a file, or from stdin when the path is "-".
fn load(input: &Path, common: &CommonArgs) -> CliResult<DocumentTree> {
    let options = common.parse_options();
    let doc = if input == Path::new("-") {
        parse_reader_with_options(std::io::stdin().lock(), options)?
    } else {
        parse_file_with_options(input, options)?
    };
    Ok(doc)
}

fn emit(content: &str, output: Option<&Path>) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn with_cleanup(options: RenderOptions, cleanup: Option<CleanupLevel>) -> RenderOptions {
    match cleanup {
        Some(level) => options.with_cleanup_preset(level.into()),
        None => options,
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    cleanup: Option<CleanupLevel>,
    common: &CommonArgs,
) -> CliResult<()> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(OutputFormat::ALL.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading document...");
    let doc = load(input, common)?;
    pb.inc(1);

    let registry = WriterRegistry::with_defaults();
    let options = ConvertOptions::new()
        .with_render_options(with_cleanup(common.render_options(), cleanup));

    let mut written = Vec::new();
    for format in OutputFormat::ALL {
        pb.set_message(format!("Writing {}...", format));
        let result = registry.convert(&doc, &options.clone().with_format(format))?;
        let filename = format!("content.{}", format.extension());
        fs::write(output_dir.join(&filename), &result.content)?;
        written.push(filename);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, filename) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), filename);
    }

    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    heading_sizes: bool,
    common: &CommonArgs,
) -> CliResult<()> {
    let doc = load(input, common)?;
    let options = common.render_options().with_heading_sizes(heading_sizes);
    let fragments = DocumentRenderer::new(options.clone()).render(&doc);
    emit(&render::to_html(&fragments, &options), output)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    cleanup: Option<CleanupLevel>,
    max_heading: u8,
    common: &CommonArgs,
) -> CliResult<()> {
    let doc = load(input, common)?;
    let options = with_cleanup(common.render_options(), cleanup).with_max_heading(max_heading);
    let fragments = DocumentRenderer::new(options.clone()).render(&doc);
    emit(&render::to_markdown(&fragments, &options), output)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    cleanup: Option<CleanupLevel>,
    max_chars: Option<usize>,
    common: &CommonArgs,
) -> CliResult<()> {
    let doc = load(input, common)?;
    let options = with_cleanup(common.render_options(), cleanup);
    let fragments = DocumentRenderer::new(options.clone()).render(&doc);

    let text = match max_chars {
        Some(max_chars) => excerpt(&fragments, max_chars),
        None => render::to_text(&fragments, &options),
    };
    emit(&text, output)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    common: &CommonArgs,
) -> CliResult<()> {
    let doc = load(input, common)?;
    let fragments = DocumentRenderer::new(common.render_options()).render(&doc);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    emit(&render::to_json(&fragments, format)?, output)
}

fn cmd_info(input: &Path, common: &CommonArgs) -> CliResult<()> {
    let doc = load(input, common)?;
    let fragments = DocumentRenderer::new(common.render_options()).render(&doc);
    let stats = RenderStats::from_fragments(&fragments);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Blocks".bold(), doc.len());
    println!("{}: {}", "Fragments".bold(), stats.fragment_count);
    let dropped = doc.len().saturating_sub(fragments.len());
    if dropped > 0 {
        println!("{}: {}", "Dropped blocks".bold(), dropped.to_string().yellow());
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Quotes".bold(), stats.quote_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!(
        "{}: {} ({} external)",
        "Links".bold(),
        stats.link_count,
        stats.external_link_count
    );
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    let summary = excerpt(&fragments, 160);
    if !summary.is_empty() {
        println!();
        println!("{}: {}", "Excerpt".bold(), summary.dimmed());
    }

    Ok(())
}

enum BatchSource {
    Tree(DocumentTree),
    File(PathBuf),
}

fn cmd_batch(
    input: &Path,
    output_dir: &Path,
    format: OutputFormat,
    common: &CommonArgs,
) -> CliResult<()> {
    let jobs = collect_batch(input, common)?;
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Rendering {}...", format));

    let registry = WriterRegistry::with_defaults();
    let options = ConvertOptions::new()
        .with_render_options(common.render_options().with_parallel(false))
        .with_format(format);

    let failures: Vec<(String, String)> = jobs
        .into_par_iter()
        .filter_map(|(name, source)| {
            let outcome = render_job(&registry, &options, source, common).and_then(|content| {
                let path = output_dir.join(format!("{}.{}", name, format.extension()));
                fs::write(path, content).map_err(Into::into)
            });
            pb.inc(1);
            outcome.err().map(|e| (name, e.to_string()))
        })
        .collect();

    pb.finish_with_message("Done!");

    if failures.is_empty() {
        println!("{} {}", "Written to".green(), output_dir.display());
        return Ok(());
    }

    for (name, error) in &failures {
        eprintln!("  {} {}: {}", "✗".red(), name, error);
    }
    Err(format!("{} documents failed", failures.len()).into())
}

fn collect_batch(input: &Path, common: &CommonArgs) -> CliResult<Vec<(String, BatchSource)>> {
    if input.is_dir() {
        let mut paths: Vec<PathBuf> = fs::read_dir(input)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("json"))
            })
            .collect();
        paths.sort();

        return Ok(paths
            .into_iter()
            .map(|path| {
                let name = path
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned();
                (name, BatchSource::File(path))
            })
            .collect());
    }

    let parser = DocumentParser::open_with_options(input, common.parse_options())?;
    let trees = parser.parse_many()?;
    log::info!("loaded {} records from {}", trees.len(), input.display());

    Ok(trees
        .into_iter()
        .enumerate()
        .map(|(i, tree)| (format!("{:04}", i), BatchSource::Tree(tree)))
        .collect())
}

fn render_job(
    registry: &WriterRegistry,
    options: &ConvertOptions,
    source: BatchSource,
    common: &CommonArgs,
) -> CliResult<String> {
    let doc = match source {
        BatchSource::Tree(tree) => tree,
        BatchSource::File(path) => parse_file_with_options(path, common.parse_options())?,
    };
    Ok(registry.convert(&doc, options)?.content)
}

fn cmd_version() {
    println!("{} {}", "richdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Rich-text document renderer");
    println!();
    println!("License: MIT");
}
