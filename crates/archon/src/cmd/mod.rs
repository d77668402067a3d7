use std::time::Duration;

use archon_frame::{Packet, PacketWriter};
use archon_led::Rgb;
use archon_transport::{SerialConfig, SerialLink};
use clap::{Args, Subcommand};

use crate::exit::{frame_error, transport_error, CliError, CliResult, USAGE};
use crate::output::{OutputFormat, PacketPrinter};

pub mod colors;
pub mod ctrl;
pub mod decode;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a single packet built from a type byte and payload bytes.
    Send(SendArgs),
    /// Encode a color string into LED data packets and send them.
    Colors(ColorsArgs),
    /// Send an LED control command.
    #[command(subcommand)]
    Ctrl(CtrlCommand),
    /// Decode packets from hex bytes and print them.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

/// Where produced packets go.
pub struct Output {
    pub format: OutputFormat,
    /// Serial settings, or `None` to only print packets.
    pub link: Option<SerialConfig>,
}

pub fn run(command: Command, output: &Output) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, output),
        Command::Colors(args) => colors::run(args, output),
        Command::Ctrl(command) => ctrl::run(command, output),
        Command::Decode(args) => decode::run(args, output.format),
        Command::Version(args) => version::run(args),
    }
}

/// Print every packet and, unless this is a dry run, write it to the serial
/// port. The port is opened before the first packet is consumed.
pub fn emit(packets: impl IntoIterator<Item = Packet>, output: &Output) -> CliResult<usize> {
    let mut writer = match &output.link {
        Some(config) => {
            let link =
                SerialLink::open(config).map_err(|err| transport_error("open failed", err))?;
            Some(PacketWriter::new(link))
        }
        None => None,
    };

    let mut printer = PacketPrinter::new(output.format);
    let mut count = 0usize;
    for packet in packets {
        printer.print(&packet);
        if let Some(writer) = writer.as_mut() {
            writer
                .write_packet(&packet)
                .map_err(|err| frame_error("write failed", err))?;
        }
        count += 1;
    }
    printer.finish();

    tracing::info!(packets = count, dry_run = writer.is_none(), "packets emitted");
    Ok(count)
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Packet type byte (decimal or 0x-prefixed hex).
    #[arg(value_parser = parse_byte)]
    pub packet_type: u8,
    /// Payload bytes (decimal or 0x-prefixed hex).
    #[arg(value_parser = parse_byte)]
    pub data: Vec<u8>,
}

#[derive(Args, Debug)]
pub struct ColorsArgs {
    /// Color string, e.g. "RGB#FF00FF--W".
    #[arg(allow_hyphen_values = true)]
    pub colors: String,
    /// Index of the first LED.
    #[arg(long, short = 's', default_value = "0", value_parser = parse_byte)]
    pub start: u8,
    /// Extra color code as C=RRGGBB (repeatable).
    #[arg(long = "code", value_name = "C=RRGGBB", value_parser = parse_color_code)]
    pub codes: Vec<(char, Rgb)>,
    /// Allow --code to replace existing codes.
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Subcommand, Debug)]
pub enum CtrlCommand {
    /// Select the 8-bit block that LED data writes to.
    ChangeBlock {
        #[arg(value_parser = parse_byte)]
        block: u8,
    },
    /// Copy one LED's color to other LEDs.
    Copy {
        #[arg(value_parser = parse_byte)]
        parent: u8,
        #[arg(required = true, value_parser = parse_byte)]
        children: Vec<u8>,
    },
    /// Turn off every LED in the current block.
    Erase,
    /// Push buffered colors to the LEDs now.
    Push,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Wire bytes as hex; spaces, colons and a 0x prefix are ignored.
    pub hex: String,
    /// Maximum accepted payload length.
    #[arg(long, default_value = "255")]
    pub max_payload: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse a byte given in decimal or `0x` hex.
pub fn parse_byte(input: &str) -> Result<u8, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| format!("expected a byte (0-255 or 0x00-0xff), got {input:?}"))
}

fn parse_color_code(input: &str) -> Result<(char, Rgb), String> {
    let (code, hex) = input
        .split_once('=')
        .ok_or_else(|| format!("expected C=RRGGBB, got {input:?}"))?;
    let mut chars = code.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(code), None) => code,
        _ => return Err(format!("color code must be one character, got {code:?}")),
    };
    let color = Rgb::from_hex(hex.trim_start_matches('#'))
        .ok_or_else(|| format!("expected 6 hex digits, got {hex:?}"))?;
    Ok((code, color))
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
