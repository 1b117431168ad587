use std::fmt;

use crate::pos::BlockPos;

/// A single synchronized value.
///
/// This is the closed set of payload types the sync protocol can carry.
/// Every variant has a fixed wire encoding registered under a stable
/// numeric tag; see the wire crate for the tag assignments.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed 32-bit integer.
    Int(i32),
    /// UTF-8 string.
    Str(String),
    /// IEEE-754 single-precision float.
    Float(f32),
    /// Boolean flag.
    Bool(bool),
    /// Raw octet.
    Byte(u8),
    /// Signed 64-bit integer.
    Long(i64),
    /// Block position (three signed 32-bit components).
    Pos(BlockPos),
}

impl Value {
    /// The kind discriminant of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Str(_) => ValueKind::Str,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Byte(_) => ValueKind::Byte,
            Value::Long(_) => ValueKind::Long,
            Value::Pos(_) => ValueKind::Pos,
        }
    }
}

/// Field-less discriminant for [`Value`].
///
/// Used for registry lookups and error reporting without cloning payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Str,
    Float,
    Bool,
    Byte,
    Long,
    Pos,
}

impl ValueKind {
    /// Human-readable kind name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Str => "str",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Byte => "byte",
            ValueKind::Long => "long",
            ValueKind::Pos => "pos",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Byte(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<BlockPos> for Value {
    fn from(v: BlockPos) -> Self {
        Value::Pos(v)
    }
}
