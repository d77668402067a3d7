use archon_led::{encode_colors, ColorTable};

use crate::cmd::{emit, ColorsArgs, Output};
use crate::exit::{color_error, CliResult, SUCCESS};

pub fn run(args: ColorsArgs, output: &Output) -> CliResult<i32> {
    let table = build_table(&args)?;
    let packets = encode_colors(&args.colors, args.start, &table)
        .map_err(|err| color_error("invalid color string", err))?;
    emit(packets, output)?;
    Ok(SUCCESS)
}

fn build_table(args: &ColorsArgs) -> CliResult<ColorTable> {
    let mut table = ColorTable::new();
    for &(code, color) in &args.codes {
        table
            .register(code, color, args.overwrite)
            .map_err(|err| color_error("cannot register color code", err))?;
    }
    Ok(table)
}
