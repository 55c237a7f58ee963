use ordered_float::OrderedFloat;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::annotation::{Annotated, Annotation};
use super::dataflow::DataflowError;
use super::storage::SequenceValue;

/// Runtime value
#[derive(Clone, Debug)]
pub enum Value {
    /// Absence of a value
    Nothing,

    /// 64-bit signed integer
    Integer(i64),

    /// 64-bit floating point (IEEE 754)
    Decimal(OrderedFloat<f64>),

    Boolean(bool),

    /// UTF-8 text
    Text(Arc<str>),

    /// Immutable ordered collection over any backing storage
    Vector(SequenceValue),

    /// Dataflow error, returned and passed along like any other value
    Error(Arc<DataflowError>),

    /// Payload carrying advisory annotations.
    /// Never nests: annotating an annotated value extends its list.
    Annotated(Arc<Annotated>),
}

impl Value {
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Value::Text(text.into())
    }

    pub fn decimal(n: f64) -> Self {
        Value::Decimal(OrderedFloat(n))
    }

    pub fn error(error: DataflowError) -> Self {
        Value::Error(Arc::new(error))
    }

    /// The value with annotations looked through
    pub fn payload(&self) -> &Value {
        match self {
            Value::Annotated(annotated) => annotated.value(),
            value => value,
        }
    }

    /// Copy of the payload without its annotations
    pub fn strip(&self) -> Value {
        self.payload().clone()
    }

    /// Attach an annotation, keeping existing ones in order.
    /// Attaching an annotation that is already present is a no-op.
    pub fn annotate(self, annotation: Annotation) -> Value {
        match self {
            Value::Annotated(existing) => {
                if existing.contains(&annotation) {
                    return Value::Annotated(existing);
                }
                let mut annotated = Arc::unwrap_or_clone(existing);
                annotated.push(annotation);
                Value::Annotated(Arc::new(annotated))
            }
            value => Value::Annotated(Arc::new(Annotated::new(value, vec![annotation]))),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.payload(), Value::Error(_))
    }

    pub fn as_error(&self) -> Option<&Arc<DataflowError>> {
        match self.payload() {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Tagged-result view, for callers that want to short-circuit with `?`.
    /// Successful values keep their annotations.
    pub fn into_result(self) -> Result<Value, Arc<DataflowError>> {
        match self.as_error() {
            Some(err) => Err(Arc::clone(err)),
            None => Ok(self),
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nothing => "Nothing",
            Value::Integer(_) => "Integer",
            Value::Decimal(_) => "Decimal",
            Value::Boolean(_) => "Boolean",
            Value::Text(_) => "Text",
            Value::Vector(_) => "Vector",
            Value::Error(_) => "Error",
            Value::Annotated(annotated) => annotated.value().type_name(),
        }
    }
}

/// Structural equality over payloads; annotations never take part
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.payload(), other.payload()) {
            (Value::Nothing, Value::Nothing) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            // Errors compare by cause, so repeated failed reads agree
            (Value::Error(a), Value::Error(b)) => Arc::ptr_eq(a, b) || a.cause() == b.cause(),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Value::Annotated(annotated) = self {
            return annotated.value().hash(state);
        }
        std::mem::discriminant(self).hash(state);

        match self {
            Value::Nothing => {}
            Value::Integer(n) => n.hash(state),
            Value::Decimal(n) => n.hash(state),
            Value::Boolean(b) => b.hash(state),
            Value::Text(s) => s.hash(state),
            Value::Vector(seq) => seq.hash(state),
            Value::Error(err) => err.cause().hash(state),
            Value::Annotated(_) => {}
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<SequenceValue> for Value {
    fn from(seq: SequenceValue) -> Self {
        Value::Vector(seq)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => write!(f, "Nothing"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Decimal(n) => {
                // Ensure we display at least one decimal place
                if n.0.is_finite() && n.0.fract() == 0.0 {
                    write!(f, "{:.1}", n.0)
                } else {
                    write!(f, "{}", n.0)
                }
            }
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::Vector(seq) => write!(f, "{seq}"),
            Value::Error(err) => write!(f, "(Error: {err})"),
            Value::Annotated(annotated) => write!(f, "{}", annotated.value()),
        }
    }
}
