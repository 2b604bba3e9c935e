//! Character-array marshaling: fill-then-truncate semantics over a run of
//! single-byte registers.
//!
//! All three operations walk the array's data slots in strictly ascending
//! index order, one blocking register access per slot. None of them is
//! atomic: an access failure mid-sequence leaves the completed prefix on
//! the device, and the ascending order makes that partial state
//! deterministic and reproducible.

use tracing::warn;

use crate::access::RegisterAccess;
use crate::address::CharArraySpec;
use crate::error::{AccessError, MarshalError, Result};
use crate::value::{RegisterValue, ValueKind};

/// Blank fill value: the space character.
pub const FILL_BYTE: u8 = 0x20;

/// Outcome of a [`write_text`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Number of characters actually written.
    pub written: u32,
    /// Present when the text exceeded the array and was cut short.
    pub truncated: Option<Truncation>,
}

/// Diagnostic for an over-long text value. Truncation is a recoverable
/// condition, not an error: the write still succeeds with the prefix that
/// fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    /// Slots available in the array (`capacity + 1`).
    pub slots: u32,
    /// Characters dropped from the end of the text.
    pub dropped: usize,
}

/// Reset every data slot of the array to the blank fill byte.
///
/// Leaves the full array in a known blank state regardless of prior
/// content. Idempotent; callers typically clear before [`write_text`]
/// since writes do not pad short values.
pub fn clear<D: RegisterAccess>(dev: &mut D, spec: &CharArraySpec) -> Result<()> {
    for addr in spec.slots() {
        dev.write(addr, RegisterValue::Byte(FILL_BYTE))?;
    }
    Ok(())
}

/// Write `text` into the array, one byte register per character.
///
/// Slots past the end of the text are left untouched — clear first if
/// blank padding is required. Text longer than the array is truncated to
/// the first `capacity + 1` characters; the cut is reported through the
/// returned [`WriteReport`] and a warning diagnostic, and the call still
/// succeeds.
///
/// A character above U+00FF cannot land in a byte register: the call fails
/// before that character's write is issued, leaving the already-written
/// prefix in place.
pub fn write_text<D: RegisterAccess>(
    dev: &mut D,
    spec: &CharArraySpec,
    text: &str,
) -> Result<WriteReport, MarshalError> {
    let mut chars = text.chars();
    let mut written = 0u32;

    for addr in spec.slots() {
        let Some(ch) = chars.next() else { break };
        let byte =
            u8::try_from(u32::from(ch)).map_err(|_| MarshalError::Unencodable {
                ch,
                position: written as usize,
            })?;
        dev.write(addr, RegisterValue::Byte(byte))?;
        written += 1;
    }

    let dropped = chars.count();
    let truncated = if dropped > 0 {
        let slots = spec.slot_count();
        warn!(
            base = %spec.base(),
            slots,
            dropped,
            "text exceeds array capacity, truncated"
        );
        Some(Truncation { slots, dropped })
    } else {
        None
    };

    Ok(WriteReport { written, truncated })
}

/// Read the full array back as text, in slot order.
///
/// The result has length exactly `capacity + 1` and reflects the literal
/// register content — trailing blank fill left by [`clear`] is not
/// stripped. Callers wanting a trimmed string trim separately.
pub fn read_text<D: RegisterAccess>(dev: &mut D, spec: &CharArraySpec) -> Result<String> {
    let mut out = String::with_capacity(spec.slot_count() as usize);
    for addr in spec.slots() {
        match dev.read(addr)? {
            RegisterValue::Byte(byte) => out.push(char::from(byte)),
            other => {
                return Err(AccessError::KindMismatch {
                    addr,
                    expected: ValueKind::Byte,
                    actual: other.kind(),
                })
            }
        }
    }
    Ok(out)
}
