use std::fmt;

use super::dataflow::{DataflowError, ErrorCause};
use super::value::Value;

/// Raw element as handed over by a backing storage.
///
/// Host variants mirror the primitive shapes a foreign runtime may produce;
/// `Canonical` carries a value that is already in native form.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    UnsignedLong(u64),
    Float(f32),
    Double(f64),
    Char(char),
    Str(String),
    Canonical(Value),
}

impl HostValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Null => "Null",
            HostValue::Bool(_) => "Bool",
            HostValue::Byte(_) => "Byte",
            HostValue::Short(_) => "Short",
            HostValue::Int(_) => "Int",
            HostValue::Long(_) => "Long",
            HostValue::UnsignedLong(_) => "UnsignedLong",
            HostValue::Float(_) => "Float",
            HostValue::Double(_) => "Double",
            HostValue::Char(_) => "Char",
            HostValue::Str(_) => "Str",
            HostValue::Canonical(_) => "Canonical",
        }
    }
}

impl From<Value> for HostValue {
    fn from(value: Value) -> Self {
        HostValue::Canonical(value)
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Null => write!(f, "null"),
            HostValue::Bool(b) => write!(f, "{b}"),
            HostValue::Byte(n) => write!(f, "{n}"),
            HostValue::Short(n) => write!(f, "{n}"),
            HostValue::Int(n) => write!(f, "{n}"),
            HostValue::Long(n) => write!(f, "{n}"),
            HostValue::UnsignedLong(n) => write!(f, "{n}"),
            HostValue::Float(n) => write!(f, "{n}"),
            HostValue::Double(n) => write!(f, "{n}"),
            HostValue::Char(c) => write!(f, "'{c}'"),
            HostValue::Str(s) => write!(f, "\"{s}\""),
            HostValue::Canonical(value) => write!(f, "{value}"),
        }
    }
}

/// Converts raw elements into native values.
///
/// Implementations must be pure and return canonical input unchanged.
/// Conversion failures come back as [`Value::Error`].
pub trait CanonicalValueAdapter: Send + Sync {
    fn to_canonical(&self, raw: HostValue) -> Value;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HostConverter;

impl CanonicalValueAdapter for HostConverter {
    fn to_canonical(&self, raw: HostValue) -> Value {
        match raw {
            HostValue::Null => Value::Nothing,
            HostValue::Bool(b) => Value::Boolean(b),
            HostValue::Byte(n) => Value::Integer(n.into()),
            HostValue::Short(n) => Value::Integer(n.into()),
            HostValue::Int(n) => Value::Integer(n.into()),
            HostValue::Long(n) => Value::Integer(n),
            HostValue::UnsignedLong(n) => match i64::try_from(n) {
                Ok(n) => Value::Integer(n),
                Err(_) => Value::error(DataflowError::without_trace(
                    ErrorCause::UnrepresentableHostValue {
                        host_type: "UnsignedLong",
                        detail: format!("{n} does not fit in a 64-bit signed integer"),
                    },
                )),
            },
            HostValue::Float(n) => Value::decimal(n.into()),
            HostValue::Double(n) => Value::decimal(n),
            HostValue::Char(c) => Value::text(c.to_string()),
            HostValue::Str(s) => Value::text(s),
            HostValue::Canonical(value) => value,
        }
    }
}
