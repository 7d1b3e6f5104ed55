//! pdfscope CLI - PDF outline inference and section ranking tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfscope::render::{analysis_to_text, outline_to_text, to_json};
use pdfscope::{AnalysisConfig, DocumentRecord, JsonFormat, PageSelection, Pdfscope};

#[derive(Parser)]
#[command(name = "pdfscope")]
#[command(version)]
#[command(about = "Infer PDF outlines and rank sections for a persona and task", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the inferred title and outline
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Analysis configuration file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the reconstructed full text
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Rank sections for a persona and job, or summarize the document
    Analyze {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Who is reading (e.g., "financial analyst")
        #[arg(short, long, env = "PDFSCOPE_PERSONA")]
        persona: Option<String>,

        /// What they need to get done (e.g., "review the budget")
        #[arg(short, long, env = "PDFSCOPE_JOB")]
        job: Option<String>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,

        /// Analysis configuration file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Dump the full document record as JSON
    Json {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            json,
            compact,
            pages,
            config,
        }) => cmd_outline(&input, json, compact, pages.as_deref(), config.as_deref()),
        Some(Commands::Text {
            input,
            output,
            pages,
        }) => cmd_text(&input, output.as_deref(), pages.as_deref()),
        Some(Commands::Analyze {
            input,
            persona,
            job,
            json,
            config,
        }) => cmd_analyze(
            &input,
            persona.as_deref().unwrap_or_default(),
            job.as_deref().unwrap_or_default(),
            json,
            config.as_deref(),
        ),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print the outline if input is provided
            if let Some(input) = cli.input {
                cmd_outline(&input, false, false, None, None)
            } else {
                println!("{}", "Usage: pdfscope <FILE>".yellow());
                println!("       pdfscope --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        let advisory = e
            .downcast_ref::<pdfscope::Error>()
            .is_some_and(pdfscope::Error::is_advisory);

        if advisory {
            eprintln!("{}", e.to_string().yellow());
            std::process::exit(2);
        }
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_scope(
    pages: Option<&str>,
    config: Option<&Path>,
) -> Result<Pdfscope, Box<dyn std::error::Error>> {
    let mut scope = Pdfscope::new();

    if let Some(p) = pages {
        scope = scope.with_pages(PageSelection::parse(p)?);
    }
    if let Some(path) = config {
        scope = scope.with_config(AnalysisConfig::from_file(path)?);
    }

    Ok(scope)
}

fn spinner(input: &Path) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Processing {}...", input.display()));
    Ok(pb)
}

fn warn_failed_pages(pages: &[u32]) {
    if !pages.is_empty() {
        eprintln!(
            "{} failed to extract pages {:?}",
            "Warning:".yellow().bold(),
            pages
        );
    }
}

fn load(scope: &Pdfscope, input: &Path) -> Result<DocumentRecord, Box<dyn std::error::Error>> {
    let pb = spinner(input)?;
    let start = Instant::now();
    let result = scope.load_file(input);
    pb.finish_and_clear();

    let record = result?;
    log::debug!("Loaded {} in {:?}", input.display(), start.elapsed());
    warn_failed_pages(&record.failed_pages);
    Ok(record)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_outline(
    input: &Path,
    json: bool,
    compact: bool,
    pages: Option<&str>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scope = build_scope(pages, config)?;
    let record = load(&scope, input)?;

    if json || compact {
        println!("{}", to_json(&record.outline, json_format(compact))?);
    } else {
        println!("{}", record.filename.cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        print!("{}", outline_to_text(&record.outline));
    }

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scope = build_scope(pages, None)?;
    let record = load(&scope, input)?;
    write_output(output, &record.full_text)
}

fn cmd_analyze(
    input: &Path,
    persona: &str,
    job: &str,
    json: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scope = build_scope(None, config)?;
    let mut session = scope.into_session();

    let pb = spinner(input)?;
    let result = session.load_file(input).map(|record| record.failed_pages.clone());
    pb.finish_and_clear();
    warn_failed_pages(&result?);

    let analysis = session.analyze(persona, job)?;

    if json {
        println!("{}", to_json(&analysis, JsonFormat::Pretty)?);
    } else {
        print!("{}", analysis_to_text(&analysis));
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = load(&Pdfscope::new(), input)?;
    let json = to_json(&record, json_format(compact))?;
    write_output(output, &json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let record = load(&Pdfscope::new(), input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), record.total_pages);
    if !record.failed_pages.is_empty() {
        println!("{}: {:?}", "Failed pages".bold(), record.failed_pages);
    }
    if record.outline.has_title() {
        println!("{}: {}", "Title".bold(), record.outline.title);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sections".bold(), record.outline.len());
    println!("{}: {}", "Words".bold(), record.word_count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfscope".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline inference and section ranking tool");
    println!();
    println!("License: MIT");
}
