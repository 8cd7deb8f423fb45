//! huffpack command-line tool
//!
//! ```bash
//! # Entropy of a file
//! huffpack entropy document.txt
//!
//! # Encode into encode_document.bin
//! huffpack encode document.txt
//!
//! # Decode back into decode_document
//! huffpack decode encode_document.bin
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use huffpack::entropy::EntropyReport;
use huffpack::naming::{decoded_path, encoded_path};
use huffpack::report::{format_size, CompressionReport};
use huffpack::{Codec, CodecConfig, DecodeStatus};

#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(version)]
#[command(about = "Static Huffman encoder/decoder", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Codec configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report entropy and the theoretical minimum size of a file
    Entropy { input: PathBuf },
    /// Encode a file
    Encode {
        input: PathBuf,
        /// Output path (default: encode_<stem>.bin in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode an artifact
    Decode {
        input: PathBuf,
        /// Output path (default: decode_<stem> in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct DecodeSummary<'a> {
    input: &'a Path,
    output: &'a Path,
    artifact: EntropyReport,
    decoded: EntropyReport,
    status: DecodeStatus,
}

fn init_logging(level: &str) -> Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

fn print_entropy(label: &str, report: &EntropyReport) {
    println!(
        "{label}: {} ({} bytes), entropy {:.3} bits/byte",
        format_size(report.size),
        report.size,
        report.entropy
    );
}

fn run_entropy(input: &Path, json: bool) -> Result<()> {
    let data = read_input(input)?;
    let report = EntropyReport::new(&data);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("File: {}", input.display());
    print_entropy("Size", &report);
    let min = report.theoretical_min();
    println!("Theoretical minimum: {} ({min} bytes)", format_size(min));
    Ok(())
}

fn run_encode(codec: &Codec, input: &Path, output: &Path, json: bool) -> Result<()> {
    info!(input = %input.display(), output = %output.display(), "encoding");
    let data = read_input(input)?;
    let artifact = codec
        .encode(&data)
        .with_context(|| format!("failed to encode {}", input.display()))?;
    write_output(output, &artifact)?;

    let report = CompressionReport::new(&data, &artifact);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("Encoded {} -> {}", input.display(), output.display());
    print_entropy("Original", &report.original);
    let min = report.original.theoretical_min();
    println!("Theoretical minimum: {} ({min} bytes)", format_size(min));
    print_entropy("Encoded", &report.encoded);
    if report.original.size > 0 {
        println!("Compression: {:.2}%", report.ratio_percent);
    }
    if let Some(efficiency) = report.efficiency_percent {
        println!("Efficiency relative to entropy: {efficiency:.2}%");
    }
    Ok(())
}

fn run_decode(codec: &Codec, input: &Path, output: &Path, json: bool) -> Result<()> {
    info!(input = %input.display(), output = %output.display(), "decoding");
    let artifact = read_input(input)?;
    let decoded = codec
        .decode_with_status(&artifact)
        .with_context(|| format!("failed to decode {}", input.display()))?;
    if codec.config().strict && !decoded.is_complete() {
        anyhow::bail!("{}: {}", input.display(), decoded.status);
    }
    write_output(output, &decoded.data)?;

    let summary = DecodeSummary {
        input,
        output,
        artifact: EntropyReport::new(&artifact),
        decoded: EntropyReport::new(&decoded.data),
        status: decoded.status,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    println!("Decoded {} -> {}", input.display(), output.display());
    print_entropy("Artifact", &summary.artifact);
    print_entropy("Decoded", &summary.decoded);
    if !decoded.is_complete() {
        println!("Warning: {}", decoded.status);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let config = match &args.config {
        Some(path) => CodecConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CodecConfig::default(),
    };
    let codec = Codec::new(config);
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    match &args.command {
        Command::Entropy { input } => run_entropy(input, args.json),
        Command::Encode { input, output } => {
            let output = output.clone().unwrap_or_else(|| encoded_path(input, &cwd));
            run_encode(&codec, input, &output, args.json)
        }
        Command::Decode { input, output } => {
            let output = output.clone().unwrap_or_else(|| decoded_path(input, &cwd));
            run_decode(&codec, input, &output, args.json)
        }
    }
}
