//! `LED_CTRL` payloads.
//!
//! The first payload byte selects the sub-command; the rest are its arguments.

use archon_frame::{build_packet, Packet, LED_CTRL};

use crate::error::Result;

/// Switch the 8-bit block that subsequent `LED_DATA` packets write to.
pub const CHANGE_BLOCK: u8 = 0x42;

/// Copy one LED's value to other LEDs.
pub const COPY: u8 = 0x43;

/// Set every LED in the current block to 0.
pub const ERASE: u8 = 0x45;

/// Push the buffered values to the LEDs immediately.
pub const PUSH: u8 = 0x50;

/// An LED control command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedCommand {
    ChangeBlock(u8),
    Copy { parent: u8, children: Vec<u8> },
    Erase,
    Push,
}

impl LedCommand {
    /// The sub-command byte.
    pub fn sub_command(&self) -> u8 {
        match self {
            LedCommand::ChangeBlock(_) => CHANGE_BLOCK,
            LedCommand::Copy { .. } => COPY,
            LedCommand::Erase => ERASE,
            LedCommand::Push => PUSH,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LedCommand::ChangeBlock(_) => "CHANGE_BLOCK",
            LedCommand::Copy { .. } => "COPY",
            LedCommand::Erase => "ERASE",
            LedCommand::Push => "PUSH",
        }
    }

    /// Payload bytes: sub-command followed by its arguments.
    pub fn payload(&self) -> Vec<u8> {
        let mut payload = vec![self.sub_command()];
        match self {
            LedCommand::ChangeBlock(block) => payload.push(*block),
            LedCommand::Copy { parent, children } => {
                payload.push(*parent);
                payload.extend_from_slice(children);
            }
            LedCommand::Erase | LedCommand::Push => {}
        }
        payload
    }

    /// Parse a payload produced by [`LedCommand::payload`].
    ///
    /// Returns `None` for an unknown sub-command or missing arguments.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        let (&sub_command, args) = payload.split_first()?;
        match sub_command {
            CHANGE_BLOCK => args.first().map(|&block| LedCommand::ChangeBlock(block)),
            COPY => {
                let (&parent, children) = args.split_first()?;
                Some(LedCommand::Copy {
                    parent,
                    children: children.to_vec(),
                })
            }
            ERASE => Some(LedCommand::Erase),
            PUSH => Some(LedCommand::Push),
            _ => None,
        }
    }

    /// Build the `LED_CTRL` packet for this command.
    ///
    /// Only `Copy` can fail, when it names more than 253 children.
    pub fn to_packet(&self) -> Result<Packet> {
        let packet = build_packet(LED_CTRL, self.payload())?;
        tracing::debug!(command = self.name(), "built LED control packet");
        Ok(packet)
    }
}
