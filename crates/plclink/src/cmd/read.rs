use plclink_registers::read_scalar;

use crate::cmd::{connect, parse_node, ReadArgs};
use crate::exit::{access_error, CliResult, SUCCESS};
use crate::output::{print_value, OutputFormat};

pub fn run(args: ReadArgs, format: OutputFormat) -> CliResult<i32> {
    let addr = parse_node(&args.node)?;
    let mut session = connect(&args.path)?;

    let value = read_scalar(&mut session, addr).map_err(|err| access_error("read failed", err))?;
    print_value(addr, value, format);

    Ok(SUCCESS)
}
