use std::collections::BTreeMap;

use tracing::trace;

use crate::access::RegisterAccess;
use crate::address::{CharArraySpec, RegisterAddress};
use crate::error::{AccessError, Result};
use crate::text::FILL_BYTE;
use crate::value::RegisterValue;

/// In-memory register bank with a fixed map.
///
/// Models the remote device's exchange area: a register must be defined
/// before it can be read or written, and a defined register keeps its
/// value kind for life. Used as the simulator bank behind the serve loop
/// and as the substitutable double in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryBank {
    slots: BTreeMap<RegisterAddress, RegisterValue>,
}

impl MemoryBank {
    /// Empty bank; define registers before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a register at `addr` with an initial value. The value's kind
    /// becomes the register's kind. Redefinition replaces the slot.
    pub fn define(&mut self, addr: RegisterAddress, initial: RegisterValue) {
        self.slots.insert(addr, initial);
    }

    /// Map every register of a character array, blank-filled: the
    /// reserved base slot plus the `capacity + 1` data slots.
    pub fn define_text_block(&mut self, spec: &CharArraySpec) {
        self.define(spec.base(), RegisterValue::Byte(FILL_BYTE));
        for addr in spec.slots() {
            self.define(addr, RegisterValue::Byte(FILL_BYTE));
        }
    }

    /// Current value at `addr`, if mapped. Test/inspection helper that
    /// bypasses the access trait.
    pub fn get(&self, addr: RegisterAddress) -> Option<RegisterValue> {
        self.slots.get(&addr).copied()
    }

    /// Number of mapped registers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the bank has no mapped registers.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl RegisterAccess for MemoryBank {
    fn read(&mut self, addr: RegisterAddress) -> Result<RegisterValue> {
        let value = self
            .slots
            .get(&addr)
            .copied()
            .ok_or(AccessError::Unmapped(addr))?;
        trace!(%addr, %value, "bank read");
        Ok(value)
    }

    fn write(&mut self, addr: RegisterAddress, value: RegisterValue) -> Result<()> {
        let slot = self
            .slots
            .get_mut(&addr)
            .ok_or(AccessError::Unmapped(addr))?;
        if slot.kind() != value.kind() {
            return Err(AccessError::KindMismatch {
                addr,
                expected: value.kind(),
                actual: slot.kind(),
            });
        }
        trace!(%addr, %value, "bank write");
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn define_and_roundtrip() {
        let addr = RegisterAddress::new(4, 30);
        let mut bank = MemoryBank::new();
        bank.define(addr, RegisterValue::Float32(0.0));

        bank.write(addr, RegisterValue::Float32(45.0)).unwrap();
        assert_eq!(bank.read(addr).unwrap(), RegisterValue::Float32(45.0));
    }

    #[test]
    fn unmapped_register_rejected() {
        let mut bank = MemoryBank::new();
        let addr = RegisterAddress::new(1, 9);

        assert!(matches!(bank.read(addr), Err(AccessError::Unmapped(_))));
        assert!(matches!(
            bank.write(addr, RegisterValue::Byte(1)),
            Err(AccessError::Unmapped(_))
        ));
    }

    #[test]
    fn kind_is_fixed_at_definition() {
        let addr = RegisterAddress::new(4, 15);
        let mut bank = MemoryBank::new();
        bank.define(addr, RegisterValue::Byte(0));

        let err = bank.write(addr, RegisterValue::Float32(1.0)).unwrap_err();
        assert!(matches!(
            err,
            AccessError::KindMismatch {
                expected: ValueKind::Float32,
                actual: ValueKind::Byte,
                ..
            }
        ));
        // Failed write leaves the slot untouched.
        assert_eq!(bank.read(addr).unwrap(), RegisterValue::Byte(0));
    }

    #[test]
    fn kind_mismatch_names_the_held_kind() {
        let addr = RegisterAddress::new(4, 35);
        let mut bank = MemoryBank::new();
        bank.define(addr, RegisterValue::Byte(7));

        let err = bank.write(addr, RegisterValue::Float32(1.0)).unwrap_err();
        // `actual` is what the register holds, same as on the read path.
        assert_eq!(
            err.to_string(),
            "register ns=4;i=35 holds a byte value, expected float32"
        );
    }

    #[test]
    fn text_block_maps_base_and_slots_blank() {
        let spec = CharArraySpec::new(RegisterAddress::new(4, 14), 10).unwrap();
        let mut bank = MemoryBank::new();
        bank.define_text_block(&spec);

        assert_eq!(bank.len(), 12);
        assert_eq!(bank.get(spec.base()), Some(RegisterValue::Byte(FILL_BYTE)));
        for addr in spec.slots() {
            assert_eq!(bank.get(addr), Some(RegisterValue::Byte(FILL_BYTE)));
        }
    }
}
