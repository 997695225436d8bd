use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use quarry_core::{Engine, ExtractionMode, ExtractionResult, Outcome, extract, fetch_file, fetch_stdin};
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the extraction result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Fetch a web page and extract markup, text, headings, links or quotes
#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(author = "Quarry Contributors")]
#[command(version)]
#[command(about = "Extract markup, text, headings, links and quotes from web pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Extraction mode (html, text, headings, links, quotes or 1-5)
    #[arg(short, long, default_value = "text", value_name = "MODE")]
    mode: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Send a HEAD request before fetching and stop unless it returns 200
    #[arg(long)]
    head_check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("quarry=debug,quarry_core=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Anything carrying a scheme goes to the engine, which validates it.
fn is_url(input: &str) -> bool {
    input.contains("://")
}

/// Render a payload for the terminal.
///
/// Markup is printed as received; list payloads get one item per line.
fn render_text(payload: &ExtractionResult) -> String {
    match payload {
        ExtractionResult::Markup(markup) => markup.clone(),
        ExtractionResult::Text(text) if text.is_empty() => String::new(),
        ExtractionResult::Text(text) => format!("{}\n", text),
        ExtractionResult::Headings(items) | ExtractionResult::Links(items) => {
            items.iter().map(|item| format!("{}\n", item)).collect()
        }
        ExtractionResult::Quotes(records) => records
            .iter()
            .map(|record| {
                let mut block = format!("{}\n  by {}\n", record.quote, record.author);
                if !record.tags.is_empty() {
                    block.push_str(&format!("  tags: {}\n", record.tags.join(", ")));
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn write_output(path: Option<&Path>, output: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => print!("{}", output),
    }
    Ok(())
}

async fn run_url(args: &Args) -> anyhow::Result<()> {
    if args.verbose {
        echo::print_step(
            1,
            2,
            &format!("Extracting {} from {}", args.mode, args.input.bright_white().underline()),
        );
    }

    let mut builder = Engine::builder().head_check(args.head_check);
    if let Some(secs) = args.timeout {
        builder = builder.timeout(secs);
    }
    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua.as_str());
    }
    let engine = builder.build().context("Failed to build HTTP client")?;

    let outcome: Outcome = engine.run_extraction(&args.input, &args.mode).await;

    if args.verbose {
        echo::print_outcome_details(&outcome);
        eprintln!();
        echo::print_step(2, 2, "Writing output");
    }

    let output = match (args.format, &outcome.payload) {
        (OutputFormat::Json, _) => format!("{}\n", outcome.to_json_pretty().context("Failed to serialize outcome")?),
        (OutputFormat::Text, Some(payload)) => render_text(payload),
        (OutputFormat::Text, None) => String::new(),
    };

    if !output.is_empty() {
        write_output(args.output.as_deref(), &output)?;
    }

    if !outcome.is_success() {
        echo::print_error(outcome.error_message.as_deref().unwrap_or("Extraction failed"));
        bail!("Extraction failed with status code {}", outcome.http_status);
    }

    Ok(())
}

fn run_local(args: &Args) -> anyhow::Result<()> {
    let mode: ExtractionMode = args.mode.parse().context("Failed to resolve extraction mode")?;

    let html = if args.input == "-" {
        if args.verbose {
            echo::print_step(1, 3, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else {
        if args.verbose {
            echo::print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        eprintln!();
        echo::print_step(2, 3, &format!("Extracting {}", mode.description()));
    }

    let payload = extract(&html, mode).context("Failed to extract content")?;

    if args.verbose {
        echo::print_payload_details(&payload);
        eprintln!();
        echo::print_step(3, 3, "Writing output");
    }

    let output = match args.format {
        OutputFormat::Json => format!(
            "{}\n",
            serde_json::to_string_pretty(&payload).context("Failed to serialize result")?
        ),
        OutputFormat::Text => render_text(&payload),
    };

    write_output(args.output.as_deref(), &output)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    tracing::debug!(input = %args.input, mode = %args.mode, format = ?args.format, "starting");

    if is_url(&args.input) { run_url(&args).await } else { run_local(&args) }
}
