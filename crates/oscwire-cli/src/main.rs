mod logging;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glob::glob;
use oscwire_core::{Cursor, DecodeOptions, Message, OscValue, decode_message, encode_message};
use tracing::{debug, warn};

use crate::logging::{LogFormat, LogLevel, init_logging};

#[derive(Parser, Debug)]
#[command(name = "oscwire", version)]
#[command(
    about = "Decode and encode Open Sound Control (OSC 1.0) messages.",
    long_about = None,
    after_help = "Examples:\n  oscwire decode packet.osc --pretty\n  oscwire decode 'captures/*.osc' --metadata\n  oscwire encode /synth/freq f:440 -o packet.osc"
)]
struct Cli {
    /// Log output format (stderr)
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr)
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode OSC packets and print each message as JSON, one per line.
    Decode {
        /// Packet file, glob pattern over packet files, or '-' for stdin
        input: PathBuf,

        /// Input is hex text instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Byte offset at which the message starts in every packet
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Pair each argument with its type tag
        #[arg(long)]
        metadata: bool,

        /// Always print arguments as a list, even for a single argument
        #[arg(long)]
        no_unwrap: bool,

        /// Write JSON to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Encode an OSC message from typed arguments.
    #[command(
        after_help = "Arguments are written as TAG:VALUE (i:42, f:1.5, s:text, S:symbol, b:<hex>)\nor as a bare tag for literals (T, F, N, I)."
    )]
    Encode {
        /// OSC address, starting with '/'
        address: String,

        /// Typed arguments
        #[arg(value_parser = parse_arg_spec)]
        args: Vec<ArgSpec>,

        /// Output packet path (raw bytes)
        #[arg(short = 'o', long, required_unless_present = "hex")]
        output: Option<PathBuf>,

        /// Print the packet as hex to stdout
        #[arg(long, conflicts_with = "output")]
        hex: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let result = match cli.command {
        Commands::Decode {
            input,
            hex,
            offset,
            metadata,
            no_unwrap,
            output,
            pretty,
        } => {
            let mut options = DecodeOptions::default();
            if metadata {
                options = options.with_metadata();
            }
            if no_unwrap {
                options = options.keep_list();
            }
            cmd_decode(&input, hex, offset, options, output.as_deref(), pretty)
        }
        Commands::Encode {
            address,
            args,
            output,
            hex,
        } => cmd_encode(&address, &args, output.as_deref(), hex),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => err.report(),
    }
}

/// A command-line argument value; blobs own their bytes until encoding.
#[derive(Debug, Clone, PartialEq)]
enum ArgSpec {
    Value(OscValue<'static>),
    Blob(Vec<u8>),
}

impl ArgSpec {
    fn as_value(&self) -> OscValue<'_> {
        match self {
            ArgSpec::Value(value) => value.clone(),
            ArgSpec::Blob(bytes) => OscValue::Blob(bytes),
        }
    }
}

/// Failure reported to the user as `error:` plus an optional `hint:` line.
#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn report(self) -> ExitCode {
        eprintln!("error: {}", self.message);
        if let Some(hint) = self.hint {
            eprintln!("hint: {hint}");
        }
        ExitCode::from(2)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"))
    }
}

/// Raw packet bytes plus the name used for them in messages.
struct Packet {
    source: String,
    bytes: Vec<u8>,
}

fn cmd_decode(
    input: &Path,
    hex: bool,
    offset: usize,
    options: DecodeOptions,
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), CliError> {
    let packets = load_packets(input, hex)?;
    let mut documents = Vec::with_capacity(packets.len());
    for packet in &packets {
        let message = decode_packet(packet, offset, options)?;
        let json = if pretty {
            serde_json::to_string_pretty(&message)
        } else {
            serde_json::to_string(&message)
        };
        documents.push(json.context("JSON serialization failed")?);
    }

    let mut text = documents.join("\n");
    text.push('\n');
    match output {
        Some(path) => {
            write_output(path, text.as_bytes())?;
            eprintln!(
                "OK: {} message(s) written -> {}",
                documents.len(),
                path.display()
            );
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn decode_packet(
    packet: &Packet,
    offset: usize,
    options: DecodeOptions,
) -> Result<Message<'_>, CliError> {
    let mut cursor = Cursor::at(offset);
    let message = decode_message(&packet.bytes, Some(&mut cursor), options).map_err(|err| {
        CliError::new(format!("{}: not a valid OSC message: {err}", packet.source))
            .hint("check the input format (use --hex for hex text) and --offset")
    })?;

    let trailing = packet.bytes.len().saturating_sub(cursor.position());
    if trailing > 0 {
        warn!(source = %packet.source, trailing, "bytes left after the decoded message");
    }
    debug!(
        source = %packet.source,
        consumed = cursor.position().saturating_sub(offset),
        "decoded packet"
    );
    Ok(message)
}

fn cmd_encode(
    address: &str,
    args: &[ArgSpec],
    output: Option<&Path>,
    hex: bool,
) -> Result<(), CliError> {
    let values: Vec<OscValue<'_>> = args.iter().map(ArgSpec::as_value).collect();
    let bytes = encode_message(address, &values).map_err(|err| {
        CliError::new(format!("cannot encode message: {err}"))
            .hint("addresses start with '/'; strings are single-byte text")
    })?;

    if hex {
        println!("{}", hex::encode(&bytes));
        return Ok(());
    }

    let path =
        output.ok_or_else(|| CliError::new("missing output path").hint("use -o/--output or --hex"))?;
    write_output(path, &bytes)?;
    eprintln!("OK: {} bytes written -> {}", bytes.len(), path.display());
    Ok(())
}

fn parse_arg_spec(spec: &str) -> Result<ArgSpec, String> {
    let (tag, value) = match spec.split_once(':') {
        Some((tag, value)) => (tag, Some(value)),
        None => (spec, None),
    };

    if let ("b", Some(value)) = (tag, value) {
        return hex::decode(value)
            .map(ArgSpec::Blob)
            .map_err(|err| format!("invalid blob hex '{value}': {err}"));
    }

    let value = match (tag, value) {
        ("T", None) => Ok(OscValue::True),
        ("F", None) => Ok(OscValue::False),
        ("N", None) => Ok(OscValue::Nil),
        ("I", None) => Ok(OscValue::Impulse),
        ("i", Some(value)) => value
            .parse()
            .map(OscValue::Int32)
            .map_err(|err| format!("invalid int32 '{value}': {err}")),
        ("f", Some(value)) => value
            .parse()
            .map(OscValue::Float32)
            .map_err(|err| format!("invalid float32 '{value}': {err}")),
        ("s", Some(value)) => Ok(OscValue::String(value.to_string())),
        ("S", Some(value)) => Ok(OscValue::Symbol(value.to_string())),
        _ => Err(format!(
            "unsupported argument '{spec}' (expected i:, f:, s:, S:, b: or T, F, N, I)"
        )),
    };
    value.map(ArgSpec::Value)
}

fn load_packets(input: &Path, hex: bool) -> Result<Vec<Packet>, CliError> {
    if input.as_os_str() == "-" {
        let mut raw = Vec::new();
        io::stdin()
            .read_to_end(&mut raw)
            .context("Failed to read stdin")?;
        let bytes = packet_bytes(raw, hex, "stdin")?;
        return Ok(vec![Packet {
            source: "stdin".to_string(),
            bytes,
        }]);
    }

    packet_files(input)?
        .into_iter()
        .map(|path| -> Result<Packet, CliError> {
            let source = path.display().to_string();
            let raw = fs::read(&path)
                .with_context(|| format!("Failed to read packet file: {source}"))?;
            let bytes = packet_bytes(raw, hex, &source)?;
            Ok(Packet { source, bytes })
        })
        .collect()
}

fn packet_bytes(raw: Vec<u8>, hex: bool, source: &str) -> Result<Vec<u8>, CliError> {
    if !hex {
        return Ok(raw);
    }
    let digits: String = String::from_utf8_lossy(&raw)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    hex::decode(&digits).map_err(|err| {
        CliError::new(format!("{source}: invalid hex input: {err}"))
            .hint("hex input must contain an even number of hex digits")
    })
}

/// Packet files named by `input`: the path itself, or every file a glob
/// pattern matches, in sorted order.
fn packet_files(input: &Path) -> Result<Vec<PathBuf>, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        if !input.is_file() {
            return Err(
                CliError::new(format!("packet file not found: {}", input.display()))
                    .hint("pass a packet file, a glob such as 'captures/*.osc', or '-' for stdin"),
            );
        }
        return Ok(vec![input.to_path_buf()]);
    }

    let entries = glob(&pattern).map_err(|err| {
        CliError::new(format!("invalid packet pattern '{pattern}'")).hint(err.msg)
    })?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(CliError::new(format!("no packet files match '{pattern}'"))
            .hint("check the path, and quote the pattern so the shell leaves it alone"));
    }
    debug!(%pattern, files = files.len(), "expanded packet pattern");
    Ok(files)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}
