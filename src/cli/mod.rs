//! # CLI Module
//!
//! Command-line interface for the pixel comparison tool.
//!
//! ## Usage
//! ```bash
//! # Exact comparison, outputs in ./output
//! pixel-diff --img1 image1.png --img2 image2.png
//!
//! # Ignore channel differences up to 5%
//! pixel-diff --img1 image1.png --img2 image2.png --tolerance 5
//!
//! # Additive overlay instead of colour markers
//! pixel-diff --img1 a.png --img2 b.png --combined overlay
//!
//! # JSON output
//! pixel-diff --img1 a.png --img2 b.png --format json
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use pixel_diff::core::comparator::Tolerance;
use pixel_diff::core::pipeline::{Pipeline, PipelineResult};
use pixel_diff::core::render::CombinedStyle;
use pixel_diff::core::reporter::{difference_bar, render_text};
use pixel_diff::error::{PixelDiffError, Result, ToleranceError};
use pixel_diff::events::{DecodeEvent, Event, EventChannel, OutputEvent, PipelineEvent};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Pixel Diff - Compare two images pixel by pixel
#[derive(Parser, Debug)]
#[command(name = "pixel-diff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First image
    #[arg(long)]
    img1: PathBuf,

    /// Second image
    #[arg(long)]
    img2: PathBuf,

    /// Per-channel tolerance as a percentage (0-100)
    #[arg(
        short,
        long,
        default_value = "0",
        allow_negative_numbers = true,
        value_parser = parse_tolerance
    )]
    tolerance: Tolerance,

    /// Directory the difference images and report are written to
    #[arg(short = 'o', long, default_value = "output")]
    output_dir: PathBuf,

    /// How the combined difference image is drawn
    #[arg(long, default_value = "markers")]
    combined: Combined,

    /// Refuse inputs of different file formats
    #[arg(long)]
    strict_format: bool,

    /// Also write comparison_report.json
    #[arg(long)]
    json_report: bool,

    /// Console output format
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Combined {
    /// Red where the first image is brighter, blue where the second is
    Markers,
    /// Channel-wise sum of both difference images
    Overlay,
}

impl From<Combined> for CombinedStyle {
    fn from(combined: Combined) -> Self {
        match combined {
            Combined::Markers => CombinedStyle::Markers,
            Combined::Overlay => CombinedStyle::Overlay,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (differing pixel count only)
    Minimal,
}

fn parse_tolerance(value: &str) -> std::result::Result<Tolerance, ToleranceError> {
    value.parse()
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    pixel_diff::init_tracing(cli.verbose);
    run_compare(cli)
}

/// Print a fatal error to stderr
pub fn print_error(error: &PixelDiffError) {
    Term::stderr()
        .write_line(&format!("{} {}", style("Error:").red().bold(), error))
        .ok();
}

fn run_compare(cli: Cli) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(cli.format, OutputFormat::Pretty);

    // Print header
    if pretty {
        term.write_line(&format!(
            "{} {}",
            style("Pixel Diff").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line(&format!(
            "  {} vs {} at {} tolerance",
            style(cli.img1.display()).bold(),
            style(cli.img2.display()).bold(),
            style(cli.tolerance).yellow()
        ))
        .ok();
        term.write_line("").ok();
    }

    let pipeline = Pipeline::builder(&cli.img1, &cli.img2)
        .tolerance(cli.tolerance)
        .combined_style(cli.combined.into())
        .strict_format(cli.strict_format)
        .output_dir(&cli.output_dir)
        .json_report(cli.json_report)
        .build();

    // Set up event handling
    let (sender, receiver) = EventChannel::new();

    let progress = if pretty {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose = cli.verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };

            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(format!("{}...", phase));
                }
                Event::Decode(DecodeEvent::Decoded {
                    path,
                    width,
                    height,
                    mode,
                }) if verbose => {
                    pb.println(format!(
                        "  {} {} ({}x{}, {})",
                        style("decoded").dim(),
                        path.display(),
                        width,
                        height,
                        mode
                    ));
                }
                Event::Output(OutputEvent::ArtifactWritten { path }) => {
                    pb.set_message(format!("Writing {}", path.display()));
                }
                Event::Pipeline(PipelineEvent::Completed { .. })
                | Event::Pipeline(PipelineEvent::Error { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let result = result?;

    match cli.format {
        OutputFormat::Pretty => print_pretty_results(&term, &result),
        OutputFormat::Json => print_json_results(&result),
        OutputFormat::Minimal => println!("{}", result.comparison.differing_pixels),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, result: &PipelineResult) {
    let comparison = &result.comparison;

    term.write_line(&format!(
        "{} Comparison Complete",
        style("✓").green().bold()
    ))
    .ok();
    term.write_line("").ok();

    for line in render_text(comparison).lines() {
        term.write_line(&format!("  {}", line)).ok();
    }
    term.write_line("").ok();

    let bar = difference_bar(comparison.percent_different);
    let bar = if comparison.is_similar() {
        style(bar).green()
    } else {
        style(bar).yellow()
    };
    term.write_line(&format!("  {}", bar)).ok();
    term.write_line(&format!(
        "  {}x{} {} pixels compared in {:.1}s",
        result.dimensions.0,
        result.dimensions.1,
        result.mode,
        result.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line("").ok();

    term.write_line(&format!("{}", style("Written:").bold().underlined()))
        .ok();
    for path in &result.artifacts {
        term.write_line(&format!("  {} {}", style("○").dim(), path.display()))
            .ok();
    }
}

fn print_json_results(result: &PipelineResult) {
    let output = serde_json::json!({
        "result": result.comparison,
        "similar": result.comparison.is_similar(),
        "width": result.dimensions.0,
        "height": result.dimensions.1,
        "mode": result.mode,
        "artifacts": result.artifacts,
        "duration_ms": result.duration_ms,
    });

    println!("{:#}", output);
}
