use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use aprs_decoder_core::{
    ConsoleSink, DEFAULT_BAUD_RATE, LineSource, OutputFormat, PacketLog, PacketSink,
    ReaderLineSource, SerialLineSource, decode_source,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("APRS_DECODER_BUILD_COMMIT"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  aprs-decoder listen --port /dev/rfcomm0\n  aprs-decoder listen --port /dev/ttyUSB0 --baud 9600 --format csv -o packets.csv\n  aprs-decoder replay capture.txt --format json -o packets.jsonl";

#[derive(Parser, Debug)]
#[command(name = "aprs-decoder")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode APRS packets received by a TNC (e.g. Mobilinkd TNC 4).",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read packets from a TNC over a serial device until interrupted.
    Listen {
        /// Serial port of the TNC (e.g. /dev/ttyUSB0, /dev/rfcomm0, COM3)
        #[arg(short, long)]
        port: String,

        /// Baud rate
        #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
        baud: u32,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Decode a captured text file with one APRS packet per line.
    Replay {
        /// Path (or glob pattern matching a single file) of the capture
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Log file that decoded packets are appended to
    #[arg(short = 'o', long, default_value = "aprs_packets.log")]
    output: PathBuf,

    /// Log file format
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    format: FormatArg,

    /// Do not write a log file
    #[arg(long, conflicts_with = "output")]
    no_log: bool,

    /// Suppress the console echo and status messages
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Human,
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Human => OutputFormat::Human,
            FormatArg::Csv => OutputFormat::Delimited,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Listen { port, baud, output } => cmd_listen(&port, baud, &output),
        Commands::Replay { input, output } => cmd_replay(&input, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_listen(port: &str, baud: u32, output: &OutputArgs) -> Result<(), CliError> {
    let source = SerialLineSource::open(port, baud).map_err(|err| {
        CliError::new(
            format!("cannot open serial port: {err}"),
            Some("check the --port path and that the TNC is connected or paired".to_string()),
        )
    })?;

    if !output.quiet {
        eprintln!("Connected to {port} at {baud} baud");
    }
    run_decode(source, output, true)
}

fn cmd_replay(input: &Path, output: &OutputArgs) -> Result<(), CliError> {
    let resolved = resolve_input_path(input)?;
    validate_input_file(&resolved)?;
    tracing::info!(input = %resolved.display(), "replaying capture");
    let source = ReaderLineSource::open(&resolved)
        .with_context(|| format!("Failed to read input file: {}", resolved.display()))?;
    run_decode(source, output, false)
}

fn run_decode<S: LineSource>(
    source: S,
    output: &OutputArgs,
    interactive: bool,
) -> Result<(), CliError> {
    let mut log = if output.no_log {
        None
    } else {
        Some(open_log(&output.output, output.format.into())?)
    };

    if !output.quiet {
        if let Some(log) = log.as_ref() {
            eprintln!("Logging to {}", log.path().display());
        }
        if interactive {
            eprintln!("Press Ctrl+C to stop");
        }
    }

    let mut console = ConsoleSink::stdout(OutputFormat::Human);
    let mut sinks: Vec<&mut dyn PacketSink> = Vec::new();
    if !output.quiet {
        sinks.push(&mut console);
    }
    if let Some(log) = log.as_mut() {
        sinks.push(log);
    }

    let summary = decode_source(source, &mut sinks, capture_time).context("decoding failed")?;

    if !output.quiet {
        eprintln!(
            "OK: {} packets decoded ({} with position)",
            summary.packets, summary.positions
        );
    }
    Ok(())
}

fn open_log(path: &Path, format: OutputFormat) -> Result<PacketLog, CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(CliError::new(
                format!("log directory does not exist: {}", parent.display()),
                Some("create the directory or choose another -o/--output path".to_string()),
            ));
        }
    }
    PacketLog::open(path, format)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
        .map_err(Into::into)
}

fn capture_time() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a text capture with one APRS packet per line".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a text capture with one APRS packet per line".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let more = if count > 3 { ", ..." } else { "" };
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}{}",
                    pattern, count, listed, more
                ),
                Some("pass a single capture file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
