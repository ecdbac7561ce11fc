//! Summarize command - one request, straight from the command line.

use std::fs;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use brief_core::{Outcome, SummaryLength, Upload};

use super::{build_page, load_config, print_outcome};

/// Arguments for the summarize command.
#[derive(Args)]
pub struct SummarizeArgs {
    /// PDF file to summarize
    #[arg(long, conflicts_with_all = ["text", "text_file"])]
    pdf: Option<PathBuf>,

    /// Text to summarize
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the text to summarize from a file
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Summary length (50-200)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(50..=200))]
    length: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the summary to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Text,
    /// JSON report
    Json,
}

enum Source {
    Pdf(PathBuf),
    Text(String),
    Nothing,
}

pub async fn run(args: SummarizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let mut page = build_page(&config)?;

    if let Some(length) = args.length {
        page.set_max_length(SummaryLength::new(length)?);
    }

    match read_source(&args)? {
        Source::Pdf(path) => {
            info!("Processing file: {}", path.display());
            let data = fs::read(&path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            page.upload(Upload::new(data).with_name(name));
        }
        Source::Text(text) => {
            page.toggle_mode();
            page.set_text(text);
        }
        Source::Nothing => {}
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Summarizing...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let outcome = page.summarize_now().await;
    pb.finish_and_clear();

    debug!("Total processing time: {:?}", start.elapsed());
    write_outcome(&outcome, &args)?;

    if !outcome.is_success() {
        // Already reported; only the exit status is left to set.
        std::process::exit(1);
    }
    Ok(())
}

fn read_source(args: &SummarizeArgs) -> anyhow::Result<Source> {
    if let Some(path) = &args.pdf {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        return Ok(Source::Pdf(path.clone()));
    }
    if let Some(text) = &args.text {
        return Ok(Source::Text(text.clone()));
    }
    if let Some(path) = &args.text_file {
        return Ok(Source::Text(fs::read_to_string(path)?));
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(Source::Nothing);
    }
    let mut text = String::new();
    stdin.lock().read_to_string(&mut text)?;
    Ok(Source::Text(text))
}

fn write_outcome(outcome: &Outcome, args: &SummarizeArgs) -> anyhow::Result<()> {
    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome.report())?;
            match &args.output {
                Some(path) => fs::write(path, json)?,
                None => println!("{}", json),
            }
        }
        OutputFormat::Text => match (&args.output, outcome.summary()) {
            (Some(path), Some(summary)) => {
                fs::write(path, &summary.text)?;
                println!(
                    "{} Summary written to {}",
                    style("✓").green(),
                    path.display()
                );
            }
            _ => print_outcome(outcome),
        },
    }
    Ok(())
}
