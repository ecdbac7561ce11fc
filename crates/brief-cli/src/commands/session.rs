//! Session command - an interactive, line-oriented version of the page.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use brief_core::{
    HfInferenceBackend, Mode, Page, SummarizationBackend, SummaryLength, Transition, Upload,
    ViewFlags,
};

use super::{build_page, load_config, print_outcome};

const HELP: &str = "\
Commands:
  upload <path>   choose a PDF file (switches to PDF mode)
  remove          remove the chosen PDF
  toggle          switch between PDF and pasted text
  mode <pdf|text> switch to the given input mode
  paste           enter text; finish with a line containing only '.'
  length <n>      set the summary length (50-200)
  clear           reset the input mode to PDF
  summarize       summarize the current input
  status          show the current input
  help            show this help
  quit            leave the session";

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Start with the paste area instead of the PDF uploader
    #[arg(long)]
    text_mode: bool,
}

enum Flow {
    Continue,
    Quit,
}

pub async fn run(args: SessionArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut page = build_page(&config)?;

    println!("{}", style("PDF/Text Summarizer").bold());
    println!("Upload a PDF or paste text to get a concise summary.");
    println!(
        "{}",
        style("Turns long chapters into short notes. Type 'help' for commands.").dim()
    );

    if args.text_mode {
        page.toggle_mode();
    }
    render_view(page.mode(), page.view());

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut input = stdin.lock();

    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match handle_line(&mut page, line.trim(), &mut input).await? {
            Flow::Continue => {}
            Flow::Quit => break,
        }
    }

    Ok(())
}

async fn handle_line(
    page: &mut Page<HfInferenceBackend>,
    line: &str,
    input: &mut impl BufRead,
) -> anyhow::Result<Flow> {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "upload" => match read_upload(arg) {
            Ok(upload) => {
                let transition = page.upload(upload);
                render_transition(transition);
            }
            Err(e) => eprintln!("{} {}", style("✗").red(), e),
        },
        "remove" => match page.remove_upload() {
            Some(_) => println!("Upload removed."),
            None => println!("No file uploaded."),
        },
        "toggle" => render_transition(page.toggle_mode()),
        "mode" => match arg.parse::<Mode>() {
            Ok(mode) => render_transition(page.set_mode(mode)),
            Err(e) => eprintln!("{} {}. Usage: mode <pdf|text>", style("✗").red(), e),
        },
        "paste" => {
            if page.view().text_area_visible {
                let text = read_paste(input)?;
                println!("{} characters pasted.", text.chars().count());
                page.set_text(text);
            } else {
                eprintln!("The paste area is hidden in PDF mode; use 'toggle' first.");
            }
        }
        "length" => match arg.parse::<u32>() {
            Ok(value) => match SummaryLength::new(value) {
                Ok(length) => {
                    page.set_max_length(length);
                    println!("Summary length: {}", length);
                }
                Err(e) => eprintln!("{} {}", style("✗").red(), e),
            },
            Err(_) => eprintln!("Usage: length <{}-{}>", SummaryLength::MIN, SummaryLength::MAX),
        },
        "clear" => render_transition(page.clear()),
        "summarize" => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
            pb.set_message("Summarizing...");
            pb.enable_steady_tick(Duration::from_millis(100));

            let outcome = page.summarize_now().await;
            pb.finish_and_clear();
            print_outcome(&outcome);
        }
        "status" => print_status(page),
        "help" => println!("{}", HELP),
        "quit" | "exit" => return Ok(Flow::Quit),
        other => eprintln!("Unknown command '{}'. Type 'help' for commands.", other),
    }

    Ok(Flow::Continue)
}

fn read_upload(arg: &str) -> anyhow::Result<Upload> {
    if arg.is_empty() {
        anyhow::bail!("Usage: upload <path>");
    }
    let path = Path::new(arg);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let data = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Upload::new(data).with_name(name))
}

fn read_paste(input: &mut impl BufRead) -> anyhow::Result<String> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line == "." {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines.join("\n"))
}

fn render_transition(transition: Transition) {
    if transition.changed() {
        println!("Switched from {} to {} input.", transition.from, transition.to);
    }
    render_view(transition.to, transition.view);
}

fn render_view(mode: Mode, view: ViewFlags) {
    let uploader = if view.uploader_disabled {
        style("disabled").dim()
    } else {
        style("enabled").green()
    };
    let text_area = if view.text_area_visible {
        style("shown").green()
    } else {
        style("hidden").dim()
    };
    println!(
        "mode: {} | uploader: {} | paste area: {}",
        style(mode).cyan().bold(),
        uploader,
        text_area
    );
}

fn print_status<B: SummarizationBackend>(page: &Page<B>) {
    render_view(page.mode(), page.view());
    match page.current_upload() {
        Some(upload) => println!(
            "file: {} ({} bytes)",
            upload.name.as_deref().unwrap_or("upload"),
            upload.len()
        ),
        None => println!("file: none"),
    }
    println!("pasted text: {} characters", page.text().chars().count());
    println!("summary length: {}", page.max_length());
}
