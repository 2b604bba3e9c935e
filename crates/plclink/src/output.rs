use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use plclink_registers::{CharArraySpec, RegisterAddress, RegisterValue, WriteReport};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ValueOutput {
    node: String,
    kind: &'static str,
    value: serde_json::Value,
}

#[derive(Serialize)]
struct TextOutput {
    base: String,
    capacity: u32,
    length: usize,
    text: String,
}

#[derive(Serialize)]
struct ReportOutput {
    base: String,
    written: u32,
    truncated: bool,
    dropped: usize,
}

fn value_json(value: RegisterValue) -> serde_json::Value {
    match value {
        RegisterValue::Byte(b) => serde_json::Value::from(b),
        RegisterValue::Float32(f) => serde_json::Value::from(f64::from(f)),
    }
}

pub fn print_value(addr: RegisterAddress, value: RegisterValue, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ValueOutput {
                node: addr.to_string(),
                kind: match value {
                    RegisterValue::Byte(_) => "byte",
                    RegisterValue::Float32(_) => "float32",
                },
                value: value_json(value),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["NODE", "KIND", "VALUE"])
                .add_row(vec![
                    addr.to_string(),
                    value.kind().to_string(),
                    value.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("node={addr} kind={} value={value}", value.kind());
        }
        OutputFormat::Raw => {
            println!("{value}");
        }
    }
}

pub fn print_text(spec: &CharArraySpec, text: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = TextOutput {
                base: spec.base().to_string(),
                capacity: spec.capacity(),
                length: text.chars().count(),
                text: text.to_string(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["BASE", "CAPACITY", "TEXT"])
                .add_row(vec![
                    spec.base().to_string(),
                    spec.capacity().to_string(),
                    text.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "base={} capacity={} text={text:?}",
                spec.base(),
                spec.capacity()
            );
        }
        OutputFormat::Raw => {
            let mut out = std::io::stdout();
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
    }
}

pub fn print_write_report(spec: &CharArraySpec, report: &WriteReport, format: OutputFormat) {
    let dropped = report.truncated.as_ref().map_or(0, |t| t.dropped);
    match format {
        OutputFormat::Json => {
            let out = ReportOutput {
                base: spec.base().to_string(),
                written: report.written,
                truncated: report.truncated.is_some(),
                dropped,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["BASE", "WRITTEN", "DROPPED"])
                .add_row(vec![
                    spec.base().to_string(),
                    report.written.to_string(),
                    dropped.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "base={} written={} dropped={dropped}",
                spec.base(),
                report.written
            );
        }
        OutputFormat::Raw => {
            println!("{}", report.written);
        }
    }
}
