//! Paint a rainbow across the first LEDs of a strip and push it.
//!
//! Run with:
//!   cargo run --example rainbow -- /dev/ttyUSB0
//!
//! Without a device argument the packets are only printed.

use archon::frame::{PacketWriter, START_OF_MESSAGE};
use archon::led::{encode_colors, ColorTable, LedCommand, Rgb};
use archon::transport::{SerialConfig, SerialLink};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut table = ColorTable::new();
    table.register('P', Rgb::new(0xFF, 0xC0, 0xCB), false)?;

    let mut packets: Vec<_> = encode_colors("ROYGBIVP#00FFFF-W", 0, &table)?.collect();
    packets.push(LedCommand::Push.to_packet()?);

    match std::env::args().nth(1) {
        Some(path) => {
            let link = SerialLink::open(&SerialConfig::new(path))?;
            eprintln!("Writing {} packets to {}", packets.len(), link.path());
            let mut writer = PacketWriter::new(link);
            for packet in &packets {
                writer.write_packet(packet)?;
            }
        }
        None => {
            for packet in &packets {
                println!("{packet}\n");
            }
            eprintln!(
                "{} packets, {} bytes on the wire (each starting with 0x{START_OF_MESSAGE:02x})",
                packets.len(),
                packets.iter().map(|p| p.wire_size()).sum::<usize>()
            );
        }
    }

    Ok(())
}
