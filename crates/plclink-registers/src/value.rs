use std::fmt;

/// A value held by a single device register.
///
/// The device exposes one scalar per register: the character-array path
/// uses byte registers, the scalar path additionally uses 32-bit floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegisterValue {
    Byte(u8),
    Float32(f32),
}

impl RegisterValue {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            RegisterValue::Byte(_) => ValueKind::Byte,
            RegisterValue::Float32(_) => ValueKind::Float32,
        }
    }
}

impl fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterValue::Byte(b) => write!(f, "{b}"),
            RegisterValue::Float32(v) => write!(f, "{v}"),
        }
    }
}

/// Kind of value a register holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Byte,
    Float32,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Byte => f.write_str("byte"),
            ValueKind::Float32 => f.write_str("float32"),
        }
    }
}
