//! huffpack: static Huffman file compressor
//!
//! ## Usage
//!
//! ```bash
//! # Compress (writes notes.txt.huff)
//! huffpack compress notes.txt
//!
//! # Decompress to an explicit path
//! huffpack decompress notes.txt.huff -o restored.txt
//!
//! # Smaller trees for inputs with few distinct bytes
//! huffpack --leaf-policy observed compress notes.txt
//!
//! # Settings from a file, overridden by flags
//! huffpack --config huffpack.json --log-level debug inspect notes.txt.huff
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use huffpack::{ContainerInfo, Error, LeafPolicy, Metrics, Result};
use huffpack_cli::{compress_file, decompress_file, inspect_file, CliConfig};

#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(version)]
#[command(about = "Static Huffman file compressor", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Configuration file path (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Leaf policy for new code trees (all, observed)
    #[arg(long, global = true)]
    leaf_policy: Option<LeafPolicy>,

    /// Replace existing output files
    #[arg(short, long, global = true)]
    force: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into a .huff container
    Compress {
        input: PathBuf,

        /// Output path (default: <INPUT>.huff)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore a file from a .huff container
    Decompress {
        input: PathBuf,

        /// Output path (default: INPUT without .huff, or <INPUT>.out)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a container's framing and code tree
    Inspect {
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("huffpack: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level())
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("huffpack: failed to set tracing subscriber: {}", err);
    }

    match run(&args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(category = err.category(), "{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Merge the config file (if any) with command-line overrides.
fn resolve_config(args: &Args) -> Result<CliConfig> {
    let mut config = match &args.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if let Some(policy) = args.leaf_policy {
        config.leaf_policy = policy;
    }
    if args.force {
        config.overwrite = true;
    }
    Ok(config)
}

fn run(command: &Command, config: &CliConfig) -> Result<()> {
    let mut metrics = Metrics::new();

    let outcome = match command {
        Command::Compress { input, output } => compress_file(
            input,
            output.as_deref(),
            &config.huffman_config(),
            config.overwrite,
        )
        .map(|outcome| metrics.record_compress(&outcome.stats)),
        Command::Decompress { input, output } => {
            decompress_file(input, output.as_deref(), config.overwrite)
                .map(|outcome| metrics.record_decompress(&outcome.stats))
        }
        Command::Inspect { input, json } => {
            let info = inspect_file(input)?;
            return print_info(&info, *json);
        }
    };

    if outcome.is_err() {
        metrics.record_error();
    }
    info!("{}", metrics.summary());
    outcome
}

fn print_info(info: &ContainerInfo, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(info)
            .map_err(|err| Error::encoding(format!("failed to render JSON: {}", err)))?;
        println!("{}", text);
        return Ok(());
    }

    println!("container bytes:  {}", info.container_bytes);
    println!("tree span bytes:  {}", info.tree_span_bytes);
    println!("data bits:        {}", info.total_data_bits);
    println!("data span bytes:  {}", info.data_span_bytes);
    println!("leaves:           {}", info.leaf_count);
    println!("tree depth:       {}", info.tree_depth);
    println!("code lengths:");
    for (symbol, len) in &info.code_lengths {
        println!("  0x{:02x}  {:>3}", symbol, len);
    }
    Ok(())
}
