use archon_frame::build_packet;

use crate::cmd::{emit, Output, SendArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};

pub fn run(args: SendArgs, output: &Output) -> CliResult<i32> {
    let packet = build_packet(args.packet_type, args.data)
        .map_err(|err| frame_error("invalid packet", err))?;
    emit([packet], output)?;
    Ok(SUCCESS)
}
