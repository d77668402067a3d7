use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("archon {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: archon");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build_target: {}",
        option_env!("ARCHON_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "protocol: start=0x{:02x} max_payload={} leds_per_packet={}",
        archon_frame::START_OF_MESSAGE,
        archon_frame::MAX_PAYLOAD,
        archon_led::LEDS_PER_PACKET
    );

    Ok(SUCCESS)
}
