use std::io::{IsTerminal, Write};

use archon_frame::{is_advisory, serialize, type_name, Packet};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PacketOutput<'a> {
    packet_type: u8,
    type_name: &'a str,
    advisory: bool,
    length: u8,
    payload: String,
    checksum: u8,
    wire: String,
}

/// Prints packets as they are produced. Table output is collected and
/// rendered once by [`PacketPrinter::finish`].
pub struct PacketPrinter {
    format: OutputFormat,
    table: Option<Table>,
}

impl PacketPrinter {
    pub fn new(format: OutputFormat) -> Self {
        let table = matches!(format, OutputFormat::Table).then(|| {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["TYPE", "LENGTH", "PAYLOAD", "CHECKSUM"]);
            table
        });
        Self { format, table }
    }

    pub fn print(&mut self, packet: &Packet) {
        match self.format {
            OutputFormat::Json => {
                let out = PacketOutput {
                    packet_type: packet.packet_type(),
                    type_name: type_name(packet.packet_type()),
                    advisory: is_advisory(packet.packet_type()),
                    length: packet.length(),
                    payload: hex_bytes(packet.payload(), ":"),
                    checksum: packet.checksum(),
                    wire: hex_bytes(&serialize(packet), " "),
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Table => {
                if let Some(table) = self.table.as_mut() {
                    table.add_row(vec![
                        format!(
                            "{} (0x{:02x})",
                            type_name(packet.packet_type()),
                            packet.packet_type()
                        ),
                        packet.length().to_string(),
                        hex_bytes(packet.payload(), ":"),
                        format!("0x{:02x}", packet.checksum()),
                    ]);
                }
            }
            OutputFormat::Pretty => {
                println!("{packet}\n");
            }
            OutputFormat::Raw => {
                print_raw(&serialize(packet));
            }
        }
    }

    pub fn finish(self) {
        if let Some(table) = self.table {
            println!("{table}");
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn hex_bytes(data: &[u8], separator: &str) -> String {
    data.iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(hex_bytes(&[0x15, 0x0a, 0xff], " "), "15 0a ff");
        assert_eq!(hex_bytes(&[], ":"), "");
    }
}
