//! Full exchange against an in-process bank — the classic sequence:
//! blank a character array, write text into it, read it back, bump a
//! counter, and set a float setpoint.
//!
//! Run with:
//!   cargo run --example exchange
//!
//! The same calls work unchanged against a remote bank: swap the
//! `MemoryBank` for a `plclink::session::Session`.

use plclink::registers::{
    clear, read_byte, read_float, read_text, write_float, write_text, CharArraySpec, MemoryBank,
    RegisterAddress, RegisterValue,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let label = CharArraySpec::new(RegisterAddress::new(4, 14), 10)?;
    let setpoint = RegisterAddress::new(4, 30);
    let counter = RegisterAddress::new(4, 35);

    let mut bank = MemoryBank::new();
    bank.define_text_block(&label);
    bank.define(setpoint, RegisterValue::Float32(0.0));
    bank.define(counter, RegisterValue::Byte(0));

    clear(&mut bank, &label)?;
    println!("blanked: {:?}", read_text(&mut bank, &label)?);

    let report = write_text(&mut bank, &label, "prova_scrittura_array")?;
    println!("written: {} characters", report.written);
    if let Some(truncation) = &report.truncated {
        println!(
            "truncated: {} characters did not fit in {} slots",
            truncation.dropped, truncation.slots
        );
    }
    println!("readback: {:?}", read_text(&mut bank, &label)?);

    let count = read_byte(&mut bank, counter)?;
    println!("counter: {count}");

    write_float(&mut bank, setpoint, 45.0)?;
    println!("setpoint: {}", read_float(&mut bank, setpoint)?);

    Ok(())
}
