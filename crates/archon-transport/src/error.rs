/// Errors that can occur in serial transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the serial device.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: serialport::Error,
    },

    /// The configured baud rate is not usable.
    #[error("invalid baud rate: {0}")]
    InvalidBaudRate(u32),

    /// An I/O error occurred on the serial stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// True if the device exists but this process may not use it.
    pub fn is_permission_denied(&self) -> bool {
        let denied = std::io::ErrorKind::PermissionDenied;
        match self {
            TransportError::Open { source, .. } => {
                source.kind() == serialport::ErrorKind::Io(denied)
            }
            TransportError::Io(err) => err.kind() == denied,
            TransportError::InvalidBaudRate(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
