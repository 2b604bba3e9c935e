mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "plclink", version, about = "Register-addressed device access CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_write_str_subcommand() {
        let cli = Cli::try_parse_from([
            "plclink",
            "write-str",
            "/tmp/test.sock",
            "ns=4;i=14",
            "prova_scrittura_array",
            "--capacity",
            "10",
        ])
        .expect("write-str args should parse");

        assert!(matches!(cli.command, Command::WriteStr(_)));
    }

    #[test]
    fn rejects_conflicting_value_args() {
        let err = Cli::try_parse_from([
            "plclink",
            "write",
            "/tmp/test.sock",
            "ns=4;i=30",
            "--byte",
            "7",
            "--float",
            "45",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_serve_subcommand() {
        let cli = Cli::try_parse_from([
            "plclink",
            "serve",
            "/tmp/test.sock",
            "--device-id",
            "bench-rig",
        ])
        .expect("serve args should parse");
        assert!(matches!(cli.command, Command::Serve(_)));
    }

    #[test]
    fn read_str_requires_capacity() {
        let err = Cli::try_parse_from(["plclink", "read-str", "/tmp/test.sock", "ns=4;i=14"])
            .expect_err("missing capacity should fail");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }
}
