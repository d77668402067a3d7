use std::io::{ErrorKind, Write};

use bytes::{Bytes, BytesMut};

use crate::codec::{build_packet, encode_packet, Packet, PacketConfig, OVERHEAD};
use crate::error::{FrameError, Result};

/// Writes complete packets to any `Write` stream.
pub struct PacketWriter<T> {
    inner: T,
    buf: BytesMut,
    config: PacketConfig,
}

impl<T: Write> PacketWriter<T> {
    /// Create a new packet writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, PacketConfig::default())
    }

    /// Create a new packet writer with explicit configuration.
    pub fn with_config(inner: T, config: PacketConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(OVERHEAD + config.max_payload_size),
            config,
        }
    }

    /// Write a complete packet (blocking), then flush.
    pub fn write_packet(&mut self, packet: &Packet) -> Result<()> {
        if packet.payload().len() > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size: packet.payload().len(),
                max: self.config.max_payload_size,
            });
        }

        self.buf.clear();
        encode_packet(packet, &mut self.buf);

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        tracing::debug!(
            packet_type = packet.packet_type(),
            length = packet.length(),
            bytes = self.buf.len(),
            "wrote packet"
        );
        self.flush()
    }

    /// Build and send a packet from a type byte and payload.
    pub fn send(&mut self, packet_type: u8, payload: impl Into<Bytes>) -> Result<()> {
        let packet = build_packet(packet_type, payload)?;
        self.write_packet(&packet)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current packet writer configuration.
    pub fn config(&self) -> &PacketConfig {
        &self.config
    }
}
