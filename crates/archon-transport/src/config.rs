use std::time::Duration;

/// Serial device used when none is configured.
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Baud rate of the LED controller firmware.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Read/write timeout applied to the opened port.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Serial link settings. Data format is fixed at 8N1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0` or `COM3`.
    pub path: String,
    pub baud_rate: u32,
    pub timeout: Duration,
}

impl SerialConfig {
    /// Settings for `path` with default baud rate and timeout.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
