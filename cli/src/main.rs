//! docshape CLI - document structure inference tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docshape::{
    extract::load_entities, joined_text, structure, CleanupPreset, ExtractOptions, Extraction,
    JsonFormat, PageSelection, RenderOptions, ReportOptions,
};

#[derive(Parser)]
#[command(name = "docshape")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer document structure from positioned text spans", long_about = None)]
struct Cli {
    /// Input span dump file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a dump into all formats (JSON, Markdown outline, report)
    Analyze {
        /// Input span dump file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        ingest: IngestArgs,
    },

    /// Output the inferred structure as JSON
    Json {
        /// Input span dump file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        ingest: IngestArgs,
    },

    /// Output the inferred structure as a Markdown outline
    #[command(alias = "md")]
    Markdown {
        /// Input span dump file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Omit the entities table
        #[arg(long)]
        no_entities: bool,

        #[command(flatten)]
        ingest: IngestArgs,
    },

    /// Output the inferred structure as a plain-text report
    Report {
        /// Input span dump file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Maximum headings listed before the overflow line
        #[arg(long, default_value = "5")]
        heading_limit: usize,

        #[command(flatten)]
        ingest: IngestArgs,
    },

    /// Show dump information
    Info {
        /// Input span dump file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        ingest: IngestArgs,
    },

    /// Analyze many dumps in parallel
    Batch {
        /// Input span dump files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        #[command(flatten)]
        ingest: IngestArgs,
    },

    /// Show version information
    Version,
}

/// Ingestion flags shared by all commands.
#[derive(clap::Args)]
struct IngestArgs {
    /// Entity file from an external recognizer
    #[arg(long, value_name = "FILE")]
    entities: Option<PathBuf>,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Span text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    /// Skip invalid spans instead of failing
    #[arg(long)]
    lenient: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Aggressive cleanup
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Analyze {
            input,
            output,
            ingest,
        }) => cmd_analyze(&input, output.as_deref(), &ingest),
        Some(Commands::Json {
            input,
            output,
            compact,
            ingest,
        }) => cmd_json(&input, output.as_deref(), compact, &ingest),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            no_entities,
            ingest,
        }) => cmd_markdown(&input, output.as_deref(), frontmatter, no_entities, &ingest),
        Some(Commands::Report {
            input,
            output,
            heading_limit,
            ingest,
        }) => cmd_report(&input, output.as_deref(), heading_limit, &ingest),
        Some(Commands::Info { input, ingest }) => cmd_info(&input, &ingest),
        Some(Commands::Batch {
            inputs,
            output,
            ingest,
        }) => cmd_batch(&inputs, &output, &ingest),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: analyze if input is provided
            if let Some(input) = cli.input {
                let ingest = IngestArgs {
                    entities: None,
                    pages: None,
                    cleanup: None,
                    lenient: false,
                };
                cmd_analyze(&input, cli.output.as_deref(), &ingest)
            } else {
                println!("{}", "Usage: docshape <FILE> [OUTPUT]".yellow());
                println!("       docshape --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_options(ingest: &IngestArgs) -> Result<ExtractOptions, Box<dyn std::error::Error>> {
    let mut options = ExtractOptions::new();

    if ingest.lenient {
        options = options.lenient();
    }

    if let Some(ref pages) = ingest.pages {
        let selection =
            PageSelection::parse(pages).map_err(|e| format!("Invalid page range: {}", e))?;
        options = options.with_pages(selection);
    }

    if let Some(level) = ingest.cleanup {
        options = options.with_cleanup_preset(level.into());
    }

    Ok(options)
}

/// Run the chain, then splice in a standalone entity file when given.
fn extract(input: &Path, ingest: &IngestArgs) -> Result<Extraction, Box<dyn std::error::Error>> {
    let options = build_options(ingest)?;
    let chain = docshape::ExtractionChain::with_defaults();
    let mut extraction = chain.extract(input, &options)?;

    if let Some(ref entity_path) = ingest.entities {
        extraction.entities = load_entities(entity_path)?;
    }

    Ok(extraction)
}

fn cmd_analyze(
    input: &Path,
    output: Option<&Path>,
    ingest: &IngestArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_structure", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Extracting spans...");
    let extraction = extract(input, ingest)?;
    pb.inc(1);

    pb.set_message("Inferring structure...");
    let doc = structure(&extraction.spans, &extraction.entities);
    pb.inc(1);

    pb.set_message("Writing output...");
    let json = docshape::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("structure.json"), &json)?;

    let markdown = docshape::to_markdown(&doc, &RenderOptions::new().with_frontmatter(true))?;
    fs::write(output_dir.join("outline.md"), &markdown)?;

    let report = docshape::to_report(&doc, &ReportOptions::default());
    fs::write(output_dir.join("report.txt"), &report)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} structure.json", "├─".dimmed());
    println!("  {} outline.md", "├─".dimmed());
    println!("  {} report.txt", "└─".dimmed());

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    ingest: &IngestArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = extract(input, ingest)?;
    let doc = structure(&extraction.spans, &extraction.entities);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = docshape::to_json(&doc, format)?;

    write_or_print(output, &json)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    no_entities: bool,
    ingest: &IngestArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = extract(input, ingest)?;
    let doc = structure(&extraction.spans, &extraction.entities);

    let options = RenderOptions::new()
        .with_frontmatter(frontmatter)
        .with_entities(!no_entities);
    let markdown = docshape::to_markdown(&doc, &options)?;

    write_or_print(output, &markdown)
}

fn cmd_report(
    input: &Path,
    output: Option<&Path>,
    heading_limit: usize,
    ingest: &IngestArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = extract(input, ingest)?;
    let doc = structure(&extraction.spans, &extraction.entities);

    let options = ReportOptions::new().with_heading_limit(heading_limit);
    let report = docshape::to_report(&doc, &options);

    write_or_print(output, &report)
}

fn cmd_info(input: &Path, ingest: &IngestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let format = docshape::detect_dump_from_path(input)?;
    let extraction = extract(input, ingest)?;

    println!("{}", "Dump Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Source".bold(), extraction.source);
    println!("{}: {}", "Spans".bold(), extraction.spans.len());
    println!("{}: {}", "Pages".bold(), extraction.page_count());
    println!("{}: {}", "Entities".bold(), extraction.entities.len());

    println!();
    println!("{}", "Joined Text Preview".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = joined_text(&extraction.spans);
    let preview: String = text.chars().take(500).collect();
    if text.chars().count() > 500 {
        println!("{}...", preview);
    } else {
        println!("{}", preview);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: &Path,
    ingest: &IngestArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;

    let options = build_options(ingest)?;
    let results = docshape::structure_files_with_options(inputs, &options);

    let mut failures = 0usize;
    for (input, result) in inputs.iter().zip(results) {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        match result {
            Ok(doc) => {
                let json = docshape::to_json(&doc, JsonFormat::Pretty)?;
                let path = output.join(format!("{}.structure.json", stem));
                fs::write(&path, &json)?;
                println!("{} {}", "OK".green().bold(), input.display());
            }
            Err(e) => {
                failures += 1;
                println!("{} {}: {}", "FAIL".red().bold(), input.display(), e);
            }
        }
    }

    println!(
        "\n{} {} processed, {} failed",
        "Done!".green().bold(),
        inputs.len() - failures,
        failures
    );

    if failures > 0 {
        return Err(format!("{} file(s) failed", failures).into());
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "docshape".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Document structure inference tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/docshape".dimmed()
    );
    println!("License: MIT");
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}
