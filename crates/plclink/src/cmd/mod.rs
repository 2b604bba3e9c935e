use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use plclink_registers::{CharArraySpec, RegisterAddress};
use plclink_session::Session;

use crate::exit::{address_error, session_error, CliResult};
use crate::output::OutputFormat;

pub mod clear_str;
pub mod read;
pub mod read_str;
pub mod serve;
pub mod version;
pub mod write;
pub mod write_str;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve a simulated register bank.
    Serve(ServeArgs),
    /// Read a single register.
    Read(ReadArgs),
    /// Write a single register.
    Write(WriteArgs),
    /// Read a character array as text.
    ReadStr(ReadStrArgs),
    /// Write text into a character array.
    WriteStr(WriteStrArgs),
    /// Blank a character array with fill characters.
    ClearStr(ClearStrArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Serve(args) => serve::run(args),
        Command::Read(args) => read::run(args, format),
        Command::Write(args) => write::run(args, format),
        Command::ReadStr(args) => read_str::run(args, format),
        Command::WriteStr(args) => write_str::run(args, format),
        Command::ClearStr(args) => clear_str::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Socket path to bind.
    pub path: PathBuf,
    /// Device identifier announced during hello.
    #[arg(long, default_value = "plclink-sim")]
    pub device_id: String,
    /// JSON register map; a built-in demo map is used when omitted.
    #[arg(long, value_name = "FILE")]
    pub map: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Socket path to connect to.
    pub path: PathBuf,
    /// Register node, e.g. "ns=4;i=35".
    pub node: String,
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Socket path to connect to.
    pub path: PathBuf,
    /// Register node, e.g. "ns=4;i=30".
    pub node: String,
    /// Byte value to write.
    #[arg(long, conflicts_with = "float")]
    pub byte: Option<u8>,
    /// 32-bit float value to write.
    #[arg(long, conflicts_with = "byte")]
    pub float: Option<f32>,
}

#[derive(Args, Debug)]
pub struct ReadStrArgs {
    /// Socket path to connect to.
    pub path: PathBuf,
    /// Base node of the character array, e.g. "ns=4;i=14".
    pub base: String,
    /// Declared array capacity.
    #[arg(long, short = 'n')]
    pub capacity: u32,
    /// Strip trailing fill characters from the result.
    #[arg(long)]
    pub trim: bool,
}

#[derive(Args, Debug)]
pub struct WriteStrArgs {
    /// Socket path to connect to.
    pub path: PathBuf,
    /// Base node of the character array, e.g. "ns=4;i=14".
    pub base: String,
    /// Text to write.
    pub text: String,
    /// Declared array capacity.
    #[arg(long, short = 'n')]
    pub capacity: u32,
    /// Skip the blanking pass before writing.
    #[arg(long)]
    pub no_clear: bool,
}

#[derive(Args, Debug)]
pub struct ClearStrArgs {
    /// Socket path to connect to.
    pub path: PathBuf,
    /// Base node of the character array, e.g. "ns=4;i=14".
    pub base: String,
    /// Declared array capacity.
    #[arg(long, short = 'n')]
    pub capacity: u32,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn parse_node(input: &str) -> CliResult<RegisterAddress> {
    input
        .parse()
        .map_err(|err| address_error("invalid node", err))
}

pub(crate) fn parse_spec(base: &str, capacity: u32) -> CliResult<CharArraySpec> {
    let base = parse_node(base)?;
    CharArraySpec::new(base, capacity).map_err(|err| address_error("invalid character array", err))
}

pub(crate) fn connect(path: &Path) -> CliResult<Session> {
    Session::connect(path).map_err(|err| session_error("connect failed", err))
}
