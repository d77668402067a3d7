//! Packet type bytes.
//!
//! Only `EMPTY` and `TEST` are fixed by the protocol itself. The remaining
//! values follow the order in which the device firmware documents the
//! commands; they carry no extra framing rules and differ only in how the
//! device interprets the payload.

/// Zero-length packet, used for heartbeats.
pub const EMPTY: u8 = 0x00;

/// Arbitrary payload, diagnostic use only.
pub const TEST: u8 = 0x01;

/// Sender is busy; packets sent to it may be ignored until `READY`.
pub const BUSY: u8 = 0x02;

/// LED control command; the first payload byte selects the sub-command.
pub const LED_CTRL: u8 = 0x03;

/// LED color data, 4 bytes (`index, r, g, b`) per LED.
pub const LED_DATA: u8 = 0x04;

/// Sender is ready to receive.
pub const READY: u8 = 0x05;

/// Returns a human-readable name for a packet type byte.
pub fn type_name(packet_type: u8) -> &'static str {
    match packet_type {
        EMPTY => "EMPTY",
        TEST => "TEST",
        BUSY => "BUSY",
        LED_CTRL => "LED_CTRL",
        LED_DATA => "LED_DATA",
        READY => "READY",
        _ => "UNKNOWN",
    }
}

/// Returns true if the type byte is one of the advisory flow-control states.
pub fn is_advisory(packet_type: u8) -> bool {
    matches!(packet_type, BUSY | READY)
}
