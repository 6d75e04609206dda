use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};

use undash::input::{self, InputReader, InputSource, ReaderConfig};
use undash::{
    diff_spans, highlight_dashes, DiffSpan, EmDashTransformer, OptimizerSession, ReplacementMode,
    SessionConfig, StatusKind, SystemClipboard, Transformation,
};

#[derive(Parser, Debug)]
#[command(name = "undash")]
#[command(about = "Rewrite em dashes as commas, semicolons or spaced en dashes")]
#[command(version)]
struct Args {
    /// Input file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Replacement mode: smart, comma, semicolon, en-dash or remove
    #[arg(short, long, default_value_t = ReplacementMode::Smart)]
    mode: ReplacementMode,

    /// Optimize the system clipboard in place instead of reading input
    #[arg(long, conflicts_with = "input")]
    clipboard: bool,

    /// Print a JSON report with highlight spans instead of plain text
    #[arg(long)]
    diff: bool,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat unreadable input as empty instead of failing
    #[arg(long)]
    lenient: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// JSON report emitted with --diff
#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    result: &'a Transformation,
    /// Dash highlights over the original text
    original_spans: Vec<DiffSpan>,
    /// Alignment of original and transformed text
    spans: Vec<DiffSpan>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // WHY: logs go to stderr as JSON so stdout carries only the transformed text
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .json()
        .init();

    info!("Starting undash");
    info!(?args, "Parsed CLI arguments");

    if let Some(path) = &args.input {
        // WHY: fail fast with a clear message before any I/O setup
        if !path.exists() && !args.lenient {
            anyhow::bail!("Input file does not exist: {}", path.display());
        }
    }

    let transformer = EmDashTransformer::new()?;

    let (original, result) = if args.clipboard {
        run_clipboard(&transformer, args.mode)?
    } else {
        let reader = InputReader::new(ReaderConfig {
            fail_fast: !args.lenient,
            ..Default::default()
        });
        let source = InputSource::from(args.input.clone());
        let (text, stats) = reader.read(&source).await?;
        if let Some(ref error) = stats.read_error {
            info!("Continuing with empty input after read error: {}", error);
        }
        let result = transformer.optimize(&text, args.mode);
        (text, result)
    };

    info!(
        status = ?result.status,
        occurrences = result.occurrences,
        replaced = result.replaced,
        "Transformation complete"
    );

    let rendered = if args.diff {
        let report = Report {
            result: &result,
            original_spans: highlight_dashes(&original),
            spans: diff_spans(&original, &result.text),
        };
        format!("{}\n", serde_json::to_string_pretty(&report)?)
    } else {
        result.text.clone()
    };

    match &args.output {
        Some(path) => {
            input::write_output(path, &rendered).await?;
            info!("Wrote result to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Popup-style flow: load the clipboard, optimize, write back
fn run_clipboard(
    transformer: &EmDashTransformer,
    mode: ReplacementMode,
) -> Result<(String, Transformation)> {
    let clipboard = SystemClipboard::open()?;
    let mut session = OptimizerSession::new(transformer, clipboard, SessionConfig { mode });

    let loaded = session.load();
    eprintln!("{}", loaded.text);
    let original = session.preview().to_string();

    let status = session.optimize();
    eprintln!("{}", status.text);
    if status.kind == StatusKind::Error {
        anyhow::bail!("{}", status.text);
    }

    let result = session
        .last_result()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Optimizer produced no result"))?;
    Ok((original, result))
}
