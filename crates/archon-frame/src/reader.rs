use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::codec::{decode_packet, Packet, PacketConfig, OVERHEAD};
use crate::error::{FrameError, Result};
use crate::packet_type::is_advisory;

const READ_CHUNK_SIZE: usize = 64;

/// Reads complete packets from any `Read` stream.
///
/// Handles partial reads and line noise before a start-of-message marker
/// internally; callers always get complete, checksum-verified packets.
pub struct PacketReader<T> {
    inner: T,
    buf: BytesMut,
    config: PacketConfig,
}

impl<T: Read> PacketReader<T> {
    /// Create a new packet reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, PacketConfig::default())
    }

    /// Create a new packet reader with explicit configuration.
    pub fn with_config(inner: T, config: PacketConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(OVERHEAD + config.max_payload_size),
            config,
        }
    }

    /// Read the next complete packet (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_packet(&mut self) -> Result<Packet> {
        loop {
            if let Some(packet) = decode_packet(&mut self.buf, self.config.max_payload_size)? {
                tracing::debug!(
                    packet_type = packet.packet_type(),
                    length = packet.length(),
                    advisory = is_advisory(packet.packet_type()),
                    "received packet"
                );
                return Ok(packet);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
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

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current packet reader configuration.
    pub fn config(&self) -> &PacketConfig {
        &self.config
    }
}
