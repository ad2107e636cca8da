//! ipsynth CLI: compiles IP cores to netlists with vendor synthesis tools.
//!
//! Provides `ipsynth quartus` to synthesize netlists with Intel Quartus and
//! `ipsynth list` to show the netlist catalog of a project.

#![warn(missing_docs)]

mod list;
mod pipeline;
mod quartus;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// ipsynth: IP core netlist compiler.
#[derive(Parser, Debug)]
#[command(name = "ipsynth", version, about = "IP core netlist compiler")]
pub struct Cli {
    /// Only show warnings and errors.
    #[arg(short, long, global = true, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    /// Show detailed progress (debug level).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show everything, including raw tool output (trace level).
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to an `ipsynth.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize netlists with Intel Quartus.
    Quartus(QuartusArgs),
    /// List the netlists known to the project.
    List {
        /// Only show netlists whose name contains this text.
        filter: Option<String>,
    },
}

/// Arguments for the `ipsynth quartus` subcommand.
#[derive(Parser, Debug)]
pub struct QuartusArgs {
    /// Netlist names, e.g. `PoC.fifo.cc`, or `PoC.fifo.*` for a whole entity.
    #[arg(required = true)]
    pub netlists: Vec<String>,

    /// Target board, as named by a `BOARD.<name>` section.
    #[arg(long, conflicts_with = "device", required_unless_present = "device")]
    pub board: Option<String>,

    /// Target device part number, e.g. `5CSEMA5F31C6`.
    #[arg(long)]
    pub device: Option<String>,

    /// Write project files and log the tool command without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Show informational tool output.
    #[arg(long)]
    pub show_logs: bool,

    /// Print the synthesis summary after each successful run.
    #[arg(long)]
    pub show_report: bool,

    /// Keep intermediate files.
    #[arg(long)]
    pub no_cleanup: bool,

    /// Output format for the batch report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Batch report format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress the text report.
    pub quiet: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

/// Maps the verbosity flags to a log level; `None` defers to `RUST_LOG`.
fn level_filter(cli: &Cli) -> Option<LevelFilter> {
    if cli.debug {
        Some(LevelFilter::Trace)
    } else if cli.verbose {
        Some(LevelFilter::Debug)
    } else if cli.quiet {
        Some(LevelFilter::Warn)
    } else {
        None
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level_filter(cli) {
        builder.filter_level(level);
    }
    builder.write_style(match cli.color {
        ColorChoice::Auto => env_logger::WriteStyle::Auto,
        ColorChoice::Always => env_logger::WriteStyle::Always,
        ColorChoice::Never => env_logger::WriteStyle::Never,
    });
    builder.format_timestamp(None).format_target(false);
    let _ = builder.try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Quartus(ref args) => quartus::run(args, &global),
        Command::List { ref filter } => list::run(filter.as_deref(), &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    }
}
