mod cmd;
mod exit;
mod logging;
mod output;

use archon_transport::{SerialConfig, DEFAULT_BAUD_RATE, DEFAULT_PORT};
use clap::Parser;

use crate::cmd::{Command, Output};
use crate::exit::CliResult;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "archon", version, about = "RGB LED array serial control")]
struct Cli {
    /// Serial device the LED controller is attached to.
    #[arg(long, env = "ARCHON_PORT", default_value = DEFAULT_PORT, global = true)]
    port: String,

    /// Serial baud rate.
    #[arg(long, env = "ARCHON_BAUD", default_value_t = DEFAULT_BAUD_RATE, global = true)]
    baud: u32,

    /// Serial read/write timeout (e.g. 1s, 500ms).
    #[arg(long, default_value = "1s", global = true)]
    timeout: String,

    /// Print packets without opening the serial port.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn output(&self) -> CliResult<Output> {
        let link = if self.dry_run {
            None
        } else {
            Some(SerialConfig {
                path: self.port.clone(),
                baud_rate: self.baud,
                timeout: cmd::parse_duration(&self.timeout)?,
            })
        };

        Ok(Output {
            format: self.format.unwrap_or_else(OutputFormat::default_for_stdout),
            link,
        })
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let result = cli
        .output()
        .and_then(|output| cmd::run(cli.command, &output));

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
