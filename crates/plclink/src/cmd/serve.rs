use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use plclink_registers::{MemoryBank, RegisterValue};
use plclink_session::{BankServer, SessionError};

use crate::cmd::ServeArgs;
use crate::exit::{session_error, CliError, CliResult, DATA_INVALID, INTERNAL, SUCCESS};

/// On-disk register map for the simulator.
#[derive(Deserialize, Debug)]
struct MapFile {
    #[serde(default)]
    scalars: Vec<ScalarEntry>,
    #[serde(default)]
    text_blocks: Vec<TextBlockEntry>,
}

#[derive(Deserialize, Debug)]
struct ScalarEntry {
    node: String,
    kind: MapKind,
    #[serde(default)]
    value: f64,
}

#[derive(Deserialize, Debug)]
struct TextBlockEntry {
    base: String,
    capacity: u32,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum MapKind {
    Byte,
    Float32,
}

pub fn run(args: ServeArgs) -> CliResult<i32> {
    let mut bank = match &args.map {
        Some(path) => load_bank(path)?,
        None => demo_bank(),
    };
    info!(registers = bank.len(), "register bank ready");

    let server = BankServer::bind(&args.path, &args.device_id)
        .map_err(|err| session_error("bind failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    while running.load(Ordering::SeqCst) {
        match server.serve_one(&mut bank) {
            Ok(()) => {}
            Err(err @ (SessionError::HelloFailed(_)
            | SessionError::Disconnected(_)
            | SessionError::Json(_))) => {
                // A misbehaving client must not take the simulator down.
                warn!(%err, "session rejected");
            }
            Err(err) => {
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                return Err(session_error("serve failed", err));
            }
        }
    }

    Ok(SUCCESS)
}

fn load_bank(path: &Path) -> CliResult<MemoryBank> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| crate::exit::io_error(&format!("failed reading {}", path.display()), err))?;
    let map: MapFile = serde_json::from_str(&raw)
        .map_err(|err| CliError::new(DATA_INVALID, format!("invalid register map: {err}")))?;
    build_bank(&map)
}

fn build_bank(map: &MapFile) -> CliResult<MemoryBank> {
    let mut bank = MemoryBank::new();

    for entry in &map.scalars {
        let addr = crate::cmd::parse_node(&entry.node)?;
        let value = match entry.kind {
            MapKind::Byte => {
                if entry.value.fract() != 0.0 || !(0.0..=255.0).contains(&entry.value) {
                    return Err(CliError::new(
                        DATA_INVALID,
                        format!("byte register {addr} has out-of-range value {}", entry.value),
                    ));
                }
                RegisterValue::Byte(entry.value as u8)
            }
            MapKind::Float32 => RegisterValue::Float32(entry.value as f32),
        };
        bank.define(addr, value);
    }

    for entry in &map.text_blocks {
        let spec = crate::cmd::parse_spec(&entry.base, entry.capacity)?;
        bank.define_text_block(&spec);
    }

    Ok(bank)
}

/// The bank served when no map file is given: one 10-slot character
/// array, one float setpoint, one byte counter.
fn demo_bank() -> MemoryBank {
    let map = MapFile {
        scalars: vec![
            ScalarEntry {
                node: "ns=4;i=30".to_string(),
                kind: MapKind::Float32,
                value: 0.0,
            },
            ScalarEntry {
                node: "ns=4;i=35".to_string(),
                kind: MapKind::Byte,
                value: 0.0,
            },
        ],
        text_blocks: vec![TextBlockEntry {
            base: "ns=4;i=14".to_string(),
            capacity: 10,
        }],
    };
    build_bank(&map).expect("built-in demo map is valid")
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
