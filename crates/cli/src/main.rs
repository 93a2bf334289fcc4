use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid_text::Align;

mod commands;
mod config;

use config::{CliConfig, LayoutOverrides, ALIGN_ENV, FILL_ENV, WIDTH_ENV};

#[derive(Parser)]
#[command(name = "uuidtxt")]
#[command(about = "Convert UUIDs to and from canonical text")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a UUID (braced, unhyphenated or canonical) in canonical form
    Format {
        /// UUID text to normalise
        input: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Strictly parse a canonical UUID and print its bytes
    Parse {
        /// Canonical UUID text
        input: String,
    },
    /// Print the canonical form of 16 comma-separated hex bytes
    FromBytes {
        /// Bytes, e.g. 00,01,02,...,0f
        bytes: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Check that every line is a canonical UUID
    Check {
        /// Input file (defaults to stdin)
        file: Option<PathBuf>,
    },
    /// Read whitespace-separated UUIDs and print each in canonical form
    Scan {
        /// Input file (defaults to stdin)
        file: Option<PathBuf>,
        #[command(flatten)]
        layout: LayoutArgs,
    },
}

/// Output layout flags. Each overrides the matching environment variable.
#[derive(Args)]
struct LayoutArgs {
    /// Minimum field width (UUIDTXT_WIDTH)
    #[arg(long)]
    width: Option<usize>,
    /// Padding character (UUIDTXT_FILL)
    #[arg(long)]
    fill: Option<char>,
    /// Side the UUID sits on when padded (UUIDTXT_ALIGN)
    #[arg(long, value_enum)]
    align: Option<AlignArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlignArg {
    Left,
    Right,
}

impl From<AlignArg> for Align {
    fn from(value: AlignArg) -> Self {
        match value {
            AlignArg::Left => Align::Left,
            AlignArg::Right => Align::Right,
        }
    }
}

impl From<&LayoutArgs> for LayoutOverrides {
    fn from(args: &LayoutArgs) -> Self {
        LayoutOverrides {
            width: args.width,
            fill: args.fill,
            align: args.align.map(Align::from),
        }
    }
}

/// Resolve output layout once, from the environment and the command's flags.
fn resolve_config(layout: &LayoutArgs) -> anyhow::Result<CliConfig> {
    let config = CliConfig::resolve(
        std::env::var(WIDTH_ENV).ok(),
        std::env::var(FILL_ENV).ok(),
        std::env::var(ALIGN_ENV).ok(),
        layout.into(),
    )?;
    tracing::debug!(options = ?config.format_options(), "resolved output layout");
    Ok(config)
}

/// Log filter used when `RUST_LOG` is unset or empty.
const DEFAULT_LOG_FILTER: &str = "uuidtxt=warn";

/// Build the log filter from the raw `RUST_LOG` value. A value that is set replaces the
/// default entirely.
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    match rust_log.filter(|v| !v.trim().is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    }
}

fn open_input(file: Option<PathBuf>) -> anyhow::Result<Box<dyn BufRead>> {
    match file {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Entry point for the `uuidtxt` command.
///
/// # Environment Variables
/// - `UUIDTXT_WIDTH`: minimum field width for printed UUIDs (default: 0)
/// - `UUIDTXT_FILL`: padding character (default: space)
/// - `UUIDTXT_ALIGN`: `left` or `right` (default: right)
/// - `RUST_LOG`: log filter; logs go to stderr
fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Some(Commands::Format { input, layout }) => {
            let config = resolve_config(&layout)?;
            commands::format(&input, config.format_options(), &mut stdout)?;
        }
        Some(Commands::Parse { input }) => {
            commands::parse(&input, &mut stdout)?;
        }
        Some(Commands::FromBytes { bytes, layout }) => {
            let config = resolve_config(&layout)?;
            commands::from_bytes(&bytes, config.format_options(), &mut stdout)?;
        }
        Some(Commands::Check { file }) => {
            let summary = commands::check(open_input(file)?, &mut stdout)?;
            if summary.invalid > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Scan { file, layout }) => {
            let config = resolve_config(&layout)?;
            let input = open_input(file)?;
            let count = commands::scan(input, config.format_options(), &mut stdout)?;
            tracing::info!(count, "scan finished");
        }
        None => {
            writeln!(stdout, "Use 'uuidtxt --help' for commands")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
