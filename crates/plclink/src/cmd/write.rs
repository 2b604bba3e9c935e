use plclink_registers::{RegisterAccess, RegisterValue};

use crate::cmd::{connect, parse_node, WriteArgs};
use crate::exit::{access_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_value, OutputFormat};

pub fn run(args: WriteArgs, format: OutputFormat) -> CliResult<i32> {
    let addr = parse_node(&args.node)?;
    let value = resolve_value(&args)?;

    let mut session = connect(&args.path)?;
    session
        .write(addr, value)
        .map_err(|err| access_error("write failed", err))?;
    print_value(addr, value, format);

    Ok(SUCCESS)
}

fn resolve_value(args: &WriteArgs) -> CliResult<RegisterValue> {
    match (args.byte, args.float) {
        (Some(byte), None) => Ok(RegisterValue::Byte(byte)),
        (None, Some(float)) => Ok(RegisterValue::Float32(float)),
        _ => Err(CliError::new(USAGE, "exactly one of --byte or --float is required")),
    }
}
