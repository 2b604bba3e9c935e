//! Single-register scalar access.
//!
//! The contrast case to [`crate::text`]: one register in, one value out,
//! no bounds or truncation logic. A failed access propagates immediately;
//! there is no retry.

use crate::access::RegisterAccess;
use crate::address::RegisterAddress;
use crate::error::{AccessError, Result};
use crate::value::{RegisterValue, ValueKind};

/// Write a 32-bit float to a single register.
pub fn write_float<D: RegisterAccess>(dev: &mut D, addr: RegisterAddress, value: f32) -> Result<()> {
    dev.write(addr, RegisterValue::Float32(value))
}

/// Read a 32-bit float from a single register.
pub fn read_float<D: RegisterAccess>(dev: &mut D, addr: RegisterAddress) -> Result<f32> {
    match dev.read(addr)? {
        RegisterValue::Float32(value) => Ok(value),
        other => Err(AccessError::KindMismatch {
            addr,
            expected: ValueKind::Float32,
            actual: other.kind(),
        }),
    }
}

/// Read a byte from a single register.
pub fn read_byte<D: RegisterAccess>(dev: &mut D, addr: RegisterAddress) -> Result<u8> {
    match dev.read(addr)? {
        RegisterValue::Byte(value) => Ok(value),
        other => Err(AccessError::KindMismatch {
            addr,
            expected: ValueKind::Byte,
            actual: other.kind(),
        }),
    }
}

/// Read whatever value the register holds.
pub fn read_scalar<D: RegisterAccess>(dev: &mut D, addr: RegisterAddress) -> Result<RegisterValue> {
    dev.read(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::MemoryBank;

    #[test]
    fn float_roundtrip_is_exact() {
        let addr = RegisterAddress::new(4, 35);
        let mut bank = MemoryBank::new();
        bank.define(addr, RegisterValue::Float32(0.0));

        write_float(&mut bank, addr, 45.0).unwrap();
        assert_eq!(read_float(&mut bank, addr).unwrap(), 45.0);
    }

    #[test]
    fn kind_checked_reads() {
        let byte_addr = RegisterAddress::new(4, 15);
        let float_addr = RegisterAddress::new(4, 35);
        let mut bank = MemoryBank::new();
        bank.define(byte_addr, RegisterValue::Byte(7));
        bank.define(float_addr, RegisterValue::Float32(1.5));

        assert_eq!(read_byte(&mut bank, byte_addr).unwrap(), 7);
        assert!(matches!(
            read_float(&mut bank, byte_addr),
            Err(AccessError::KindMismatch {
                expected: ValueKind::Float32,
                actual: ValueKind::Byte,
                ..
            })
        ));
        assert!(matches!(
            read_byte(&mut bank, float_addr),
            Err(AccessError::KindMismatch { .. })
        ));
    }

    #[test]
    fn unmapped_address_fails() {
        let mut bank = MemoryBank::new();
        let addr = RegisterAddress::new(1, 1);
        assert!(matches!(
            read_scalar(&mut bank, addr),
            Err(AccessError::Unmapped(a)) if a == addr
        ));
        assert!(matches!(
            write_float(&mut bank, addr, 1.0),
            Err(AccessError::Unmapped(_))
        ));
    }
}
