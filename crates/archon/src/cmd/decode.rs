use archon_frame::decode_packet;
use bytes::BytesMut;

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{OutputFormat, PacketPrinter};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let mut buf = BytesMut::from(parse_hex(&args.hex)?.as_slice());
    let mut printer = PacketPrinter::new(format);
    let mut count = 0usize;

    while let Some(packet) =
        decode_packet(&mut buf, args.max_payload).map_err(|err| frame_error("decode failed", err))?
    {
        printer.print(&packet);
        count += 1;
    }
    printer.finish();

    if !buf.is_empty() {
        return Err(CliError::new(
            DATA_INVALID,
            format!("incomplete packet: {} trailing bytes", buf.len()),
        ));
    }
    if count == 0 {
        return Err(CliError::new(DATA_INVALID, "no packets found"));
    }

    tracing::debug!(packets = count, "decoded input");
    Ok(SUCCESS)
}

/// Parse hex bytes, ignoring whitespace, `:`/`,` separators and `0x` prefixes.
fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let digits: String = input
        .split(|c: char| c.is_whitespace() || c == ':' || c == ',')
        .map(|chunk| {
            chunk
                .strip_prefix("0x")
                .or_else(|| chunk.strip_prefix("0X"))
                .unwrap_or(chunk)
        })
        .collect();

    if digits.len() % 2 != 0 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CliError::new(
            USAGE,
            format!("expected an even number of hex digits, got {input:?}"),
        ));
    }

    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| CliError::new(USAGE, format!("invalid hex input: {input:?}")))
        })
        .collect()
}
