use archon_led::LedCommand;

use crate::cmd::{emit, CtrlCommand, Output};
use crate::exit::{color_error, CliResult, SUCCESS};

pub fn run(command: CtrlCommand, output: &Output) -> CliResult<i32> {
    let packet = LedCommand::from(command)
        .to_packet()
        .map_err(|err| color_error("invalid LED command", err))?;
    emit([packet], output)?;
    Ok(SUCCESS)
}

impl From<CtrlCommand> for LedCommand {
    fn from(command: CtrlCommand) -> Self {
        match command {
            CtrlCommand::ChangeBlock { block } => LedCommand::ChangeBlock(block),
            CtrlCommand::Copy { parent, children } => LedCommand::Copy { parent, children },
            CtrlCommand::Erase => LedCommand::Erase,
            CtrlCommand::Push => LedCommand::Push,
        }
    }
}
