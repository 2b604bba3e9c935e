use plclink_registers::{read_text, FILL_BYTE};

use crate::cmd::{connect, parse_spec, ReadStrArgs};
use crate::exit::{access_error, CliResult, SUCCESS};
use crate::output::{print_text, OutputFormat};

pub fn run(args: ReadStrArgs, format: OutputFormat) -> CliResult<i32> {
    let spec = parse_spec(&args.base, args.capacity)?;
    let mut session = connect(&args.path)?;

    let mut text =
        read_text(&mut session, &spec).map_err(|err| access_error("read failed", err))?;
    if args.trim {
        let keep = text.trim_end_matches(char::from(FILL_BYTE)).len();
        text.truncate(keep);
    }
    print_text(&spec, &text, format);

    Ok(SUCCESS)
}
