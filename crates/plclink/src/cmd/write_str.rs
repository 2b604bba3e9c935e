use plclink_registers::{clear, write_text};

use crate::cmd::{connect, parse_spec, WriteStrArgs};
use crate::exit::{access_error, marshal_error, CliResult, SUCCESS};
use crate::output::{print_write_report, OutputFormat};

pub fn run(args: WriteStrArgs, format: OutputFormat) -> CliResult<i32> {
    let spec = parse_spec(&args.base, args.capacity)?;
    let mut session = connect(&args.path)?;

    if !args.no_clear {
        clear(&mut session, &spec).map_err(|err| access_error("clear failed", err))?;
    }

    let report = write_text(&mut session, &spec, &args.text)
        .map_err(|err| marshal_error("write failed", err))?;
    print_write_report(&spec, &report, format);

    Ok(SUCCESS)
}
