use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tempus-cmd")]
#[command(about = "Command-line utility for calendar and clock computations")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current instant
    Now {
        /// Offset to display the instant in (e.g. +05:30); defaults to the host zone
        #[arg(long, conflicts_with = "utc")]
        offset: Option<String>,

        /// Display the instant in UTC
        #[arg(long)]
        utc: bool,

        #[command(flatten)]
        output: commands::OutputArgs,
    },

    /// Parse a date/time string and print it in a normalized form
    Parse {
        /// Text to parse
        input: String,

        /// strftime-style pattern; RFC 3339 is assumed when omitted
        #[arg(short, long, conflicts_with = "input_rfc2822")]
        pattern: Option<String>,

        /// Parse the input as an RFC 2822 message date
        #[arg(long)]
        input_rfc2822: bool,

        #[command(flatten)]
        output: commands::OutputArgs,
    },

    /// Convert seconds since the Unix epoch to a date/time
    FromTimestamp {
        /// Seconds since 1970-01-01T00:00:00Z
        #[arg(allow_hyphen_values = true)]
        seconds: i64,

        /// Sub-second nanoseconds
        #[arg(long, default_value_t = 0)]
        nanos: u32,

        /// Offset to display the instant in
        #[arg(long)]
        offset: Option<String>,

        #[command(flatten)]
        output: commands::OutputArgs,
    },

    /// Print the elapsed time between two RFC 3339 instants (end - start)
    Diff {
        /// Start instant
        start: String,

        /// End instant
        end: String,
    },

    /// Shift an RFC 3339 instant by a span of time
    Add {
        /// Instant to shift
        instant: String,

        #[command(flatten)]
        span: commands::add::SpanArgs,

        #[command(flatten)]
        output: commands::OutputArgs,
    },
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // [LEVEL target] MSG, with RUST_LOG taking precedence over -v.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, r| writeln!(buf, "[{:<5} {}] {}", r.level(), r.target(), r.args()))
        .try_init()
        .context("init env logger")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Now {
            offset,
            utc,
            output,
        } => commands::now::run(offset, utc, output),
        Commands::Parse {
            input,
            pattern,
            input_rfc2822,
            output,
        } => commands::parse::run(input, pattern, input_rfc2822, output),
        Commands::FromTimestamp {
            seconds,
            nanos,
            offset,
            output,
        } => commands::from_timestamp::run(seconds, nanos, offset, output),
        Commands::Diff { start, end } => commands::diff::run(start, end),
        Commands::Add {
            instant,
            span,
            output,
        } => commands::add::run(instant, span, output),
    }
}
