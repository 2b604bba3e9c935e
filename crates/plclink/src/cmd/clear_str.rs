use plclink_registers::{clear, read_text};

use crate::cmd::{connect, parse_spec, ClearStrArgs};
use crate::exit::{access_error, CliResult, SUCCESS};
use crate::output::{print_text, OutputFormat};

pub fn run(args: ClearStrArgs, format: OutputFormat) -> CliResult<i32> {
    let spec = parse_spec(&args.base, args.capacity)?;
    let mut session = connect(&args.path)?;

    clear(&mut session, &spec).map_err(|err| access_error("clear failed", err))?;
    let text = read_text(&mut session, &spec).map_err(|err| access_error("readback failed", err))?;
    print_text(&spec, &text, format);

    Ok(SUCCESS)
}
