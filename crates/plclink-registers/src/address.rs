use std::fmt;
use std::str::FromStr;

use crate::error::AddressError;

/// Address of a single device register: a namespace qualifier plus a
/// numeric index within that namespace.
///
/// Addresses are plain values, ordered by `(ns, index)`. The node syntax
/// used by the device tooling is `ns=<ns>;i=<index>`, e.g. `ns=4;i=14`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegisterAddress {
    /// Namespace identifier.
    pub ns: u16,
    /// Register index within the namespace.
    pub index: u32,
}

impl RegisterAddress {
    /// Create an address from namespace and index.
    pub fn new(ns: u16, index: u32) -> Self {
        Self { ns, index }
    }

    /// The address `by` registers past this one, in the same namespace.
    ///
    /// Callers must have validated the span; see [`CharArraySpec::new`].
    pub(crate) fn offset(self, by: u32) -> Self {
        Self {
            ns: self.ns,
            index: self.index + by,
        }
    }
}

impl fmt::Display for RegisterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ns={};i={}", self.ns, self.index)
    }
}

impl FromStr for RegisterAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || AddressError::Syntax {
            input: s.to_string(),
        };

        let (ns_part, index_part) = s.split_once(';').ok_or_else(syntax)?;
        let ns_digits = ns_part.strip_prefix("ns=").ok_or_else(syntax)?;
        let index_digits = index_part.strip_prefix("i=").ok_or_else(syntax)?;

        let ns = ns_digits.parse::<u16>().map_err(|source| AddressError::Number {
            field: "namespace",
            input: s.to_string(),
            source,
        })?;
        let index = index_digits
            .parse::<u32>()
            .map_err(|source| AddressError::Number {
                field: "index",
                input: s.to_string(),
                source,
            })?;

        Ok(Self { ns, index })
    }
}

/// Shape of a fixed-width remote character array.
///
/// The array occupies `capacity + 1` addressable byte slots starting at
/// `base.index + 1`. The base register itself is reserved by the device
/// memory-map convention and is never read or written by any operation
/// here — the offset is kept explicit rather than folded into the base so
/// the convention stays visible and testable.
///
/// Capacity is fixed at construction and every operation against the spec
/// stays within `[base.index + 1, base.index + capacity + 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharArraySpec {
    base: RegisterAddress,
    capacity: u32,
}

impl CharArraySpec {
    /// Define an array at `base` with `capacity + 1` data slots.
    ///
    /// Fails if the span would run past the end of the register index
    /// space.
    pub fn new(base: RegisterAddress, capacity: u32) -> Result<Self, AddressError> {
        let end = base
            .index
            .checked_add(capacity)
            .and_then(|v| v.checked_add(1));
        if end.is_none() {
            return Err(AddressError::SpanOverflow { base, capacity });
        }
        Ok(Self { base, capacity })
    }

    /// The reserved base register. Not a data slot.
    pub fn base(&self) -> RegisterAddress {
        self.base
    }

    /// Declared capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of data slots: always `capacity + 1`.
    pub fn slot_count(&self) -> u32 {
        self.capacity + 1
    }

    /// The data-slot addresses in strictly ascending index order.
    ///
    /// Exactly `capacity + 1` addresses, `base.index + 1` through
    /// `base.index + capacity + 1`.
    pub fn slots(&self) -> impl Iterator<Item = RegisterAddress> + '_ {
        (1..=self.slot_count()).map(move |off| self.base.offset(off))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_node_syntax() {
        let addr = RegisterAddress::new(4, 14);
        assert_eq!(addr.to_string(), "ns=4;i=14");
    }

    #[test]
    fn parse_roundtrip() {
        let addr: RegisterAddress = "ns=4;i=35".parse().unwrap();
        assert_eq!(addr, RegisterAddress::new(4, 35));
        assert_eq!(addr.to_string().parse::<RegisterAddress>().unwrap(), addr);
    }

    #[test]
    fn parse_rejects_bad_syntax() {
        for input in ["", "ns=4", "i=14", "ns=4,i=14", "4;14", "ns=;i=1"] {
            let result = input.parse::<RegisterAddress>();
            assert!(result.is_err(), "'{input}' should not parse");
        }
    }

    #[test]
    fn parse_rejects_out_of_range_numbers() {
        let result = "ns=70000;i=1".parse::<RegisterAddress>();
        assert!(matches!(
            result,
            Err(AddressError::Number {
                field: "namespace",
                ..
            })
        ));

        let result = "ns=1;i=99999999999".parse::<RegisterAddress>();
        assert!(matches!(
            result,
            Err(AddressError::Number { field: "index", .. })
        ));
    }

    #[test]
    fn slots_are_offset_by_one_from_base() {
        let spec = CharArraySpec::new(RegisterAddress::new(4, 14), 10).unwrap();
        let slots: Vec<_> = spec.slots().collect();

        assert_eq!(slots.len(), 11);
        assert_eq!(slots[0], RegisterAddress::new(4, 15));
        assert_eq!(slots[10], RegisterAddress::new(4, 25));
    }

    #[test]
    fn slots_are_strictly_ascending_for_all_small_capacities() {
        for capacity in 0..=64u32 {
            let spec = CharArraySpec::new(RegisterAddress::new(1, 100), capacity).unwrap();
            let slots: Vec<_> = spec.slots().collect();

            assert_eq!(slots.len() as u32, capacity + 1);
            for pair in slots.windows(2) {
                assert!(pair[0].index < pair[1].index);
            }
        }
    }

    #[test]
    fn zero_capacity_yields_one_slot() {
        let spec = CharArraySpec::new(RegisterAddress::new(2, 7), 0).unwrap();
        let slots: Vec<_> = spec.slots().collect();
        assert_eq!(slots, vec![RegisterAddress::new(2, 8)]);
    }

    #[test]
    fn base_register_is_not_a_slot() {
        let spec = CharArraySpec::new(RegisterAddress::new(4, 14), 10).unwrap();
        assert!(spec.slots().all(|addr| addr != spec.base()));
    }

    #[test]
    fn span_overflow_rejected() {
        let result = CharArraySpec::new(RegisterAddress::new(1, u32::MAX - 1), 1);
        assert!(matches!(result, Err(AddressError::SpanOverflow { .. })));
    }

    #[test]
    fn span_at_index_space_end_accepted() {
        let spec = CharArraySpec::new(RegisterAddress::new(1, u32::MAX - 2), 1).unwrap();
        let slots: Vec<_> = spec.slots().collect();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].index, u32::MAX);
    }
}
