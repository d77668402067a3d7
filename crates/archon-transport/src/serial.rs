use std::io::{Read, Write};

use serialport::{DataBits, Parity, SerialPort, StopBits};
use tracing::{debug, info};

use crate::config::SerialConfig;
use crate::error::{Result, TransportError};

/// An open serial port. Implements Read + Write.
///
/// The port is opened 8N1 without flow control; the protocol's BUSY/READY
/// packets are advisory and handled, if at all, by the caller.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialLink {
    /// Open the serial device described by `config`.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        if config.baud_rate == 0 {
            return Err(TransportError::InvalidBaudRate(config.baud_rate));
        }

        debug!(path = %config.path, baud_rate = config.baud_rate, "opening serial port");
        let port = serialport::new(config.path.as_str(), config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(config.timeout)
            .open()
            .map_err(|source| TransportError::Open {
                path: config.path.clone(),
                source,
            })?;
        info!(path = %config.path, baud_rate = config.baud_rate, "serial port open");

        Ok(Self {
            port,
            path: config.path.clone(),
        })
    }

    /// Device path this link was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Read for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SerialLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.port.flush()
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_baud_rejected_before_open() {
        let config = SerialConfig {
            baud_rate: 0,
            ..SerialConfig::default()
        };
        let err = SerialLink::open(&config).unwrap_err();
        assert!(matches!(err, TransportError::InvalidBaudRate(0)));
    }

    #[test]
    #[cfg(unix)]
    fn missing_device_reports_path() {
        let path = format!("/dev/archon-missing-{}", std::process::id());
        let err = SerialLink::open(&SerialConfig::new(path.clone())).unwrap_err();

        match err {
            TransportError::Open { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
