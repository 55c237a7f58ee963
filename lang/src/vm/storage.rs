//! Backing storages for immutable sequences.
//!
//! A [`SequenceValue`] hides which storage it is built on. All reads go through
//! a [`RepresentationBridge`], which needs exactly two operations from a
//! backing: its length and a positional read.

use im::Vector;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use thiserror::Error;

use super::host::HostValue;
use super::value::Value;
use crate::error::RuntimeError;

/// Failure signalled by a backing when reading an element
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The backing does not consider `index` readable
    #[error("index {0} is not readable")]
    InvalidIndex(usize),
    /// The backing cannot answer the request at all
    #[error("unsupported message: {0}")]
    Unsupported(String),
}

/// Array protocol for storages defined outside this crate
pub trait ForeignArray: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &'static str;

    /// Number of elements; a negative size is a contract violation
    fn array_size(&self) -> Result<i64, ReadError>;

    fn read_array_element(&self, index: usize) -> Result<HostValue, ReadError>;
}

type ElementFn = dyn Fn(usize) -> Value + Send + Sync;

/// Lazily materialized storage: a fixed length and an element function
#[derive(Clone)]
pub struct ArrayProxy {
    length: usize,
    element: Arc<ElementFn>,
}

impl ArrayProxy {
    pub fn new(length: usize, element: impl Fn(usize) -> Value + Send + Sync + 'static) -> Self {
        Self {
            length,
            element: Arc::new(element),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl fmt::Debug for ArrayProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayProxy")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Storage {
    /// Persistent vector of native values
    Persistent(Vector<Value>),
    /// Flat array of native values
    Packed(Arc<[Value]>),
    /// Raw host elements, converted on read
    Host(Arc<[HostValue]>),
    Proxy(ArrayProxy),
    Foreign(Arc<dyn ForeignArray>),
}

impl Storage {
    fn kind_name(&self) -> &'static str {
        match self {
            Storage::Persistent(_) => "persistent",
            Storage::Packed(_) => "packed",
            Storage::Host(_) => "host",
            Storage::Proxy(_) => "proxy",
            Storage::Foreign(array) => array.type_name(),
        }
    }

    /// Elements of storages that already hold native values
    fn materialized(&self) -> Option<Box<dyn ExactSizeIterator<Item = &Value> + '_>> {
        match self {
            Storage::Persistent(values) => Some(Box::new(values.iter())),
            Storage::Packed(values) => Some(Box::new(values.iter())),
            _ => None,
        }
    }
}

/// Immutable logical sequence over any backing storage
#[derive(Debug, Clone)]
pub struct SequenceValue {
    storage: Storage,
}

impl SequenceValue {
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            storage: Storage::Persistent(values.into_iter().collect()),
        }
    }

    pub fn packed(values: impl Into<Arc<[Value]>>) -> Self {
        Self {
            storage: Storage::Packed(values.into()),
        }
    }

    pub fn host(values: impl Into<Arc<[HostValue]>>) -> Self {
        Self {
            storage: Storage::Host(values.into()),
        }
    }

    pub fn proxy(proxy: ArrayProxy) -> Self {
        Self {
            storage: Storage::Proxy(proxy),
        }
    }

    pub fn foreign(array: Arc<dyn ForeignArray>) -> Self {
        Self {
            storage: Storage::Foreign(array),
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        self.storage.kind_name()
    }

    fn same_storage(&self, other: &Self) -> bool {
        match (&self.storage, &other.storage) {
            (Storage::Persistent(a), Storage::Persistent(b)) => a.ptr_eq(b),
            (Storage::Packed(a), Storage::Packed(b)) => Arc::ptr_eq(a, b),
            (Storage::Host(a), Storage::Host(b)) => Arc::ptr_eq(a, b),
            (Storage::Proxy(a), Storage::Proxy(b)) => {
                a.length == b.length && Arc::ptr_eq(&a.element, &b.element)
            }
            (Storage::Foreign(a), Storage::Foreign(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

/// Materialized native storages compare element-wise; everything else
/// compares by identity, since comparing would mean reading the whole backing.
impl PartialEq for SequenceValue {
    fn eq(&self, other: &Self) -> bool {
        if self.same_storage(other) {
            return true;
        }
        match (self.storage.materialized(), other.storage.materialized()) {
            (Some(a), Some(b)) => a.len() == b.len() && a.zip(b).all(|(x, y)| x == y),
            _ => false,
        }
    }
}

impl Eq for SequenceValue {}

impl Hash for SequenceValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(values) = self.storage.materialized() {
            values.len().hash(state);
            for value in values {
                value.hash(state);
            }
            return;
        }

        match &self.storage {
            Storage::Host(values) => std::ptr::hash(Arc::as_ptr(values) as *const u8, state),
            Storage::Proxy(proxy) => {
                proxy.length.hash(state);
                std::ptr::hash(Arc::as_ptr(&proxy.element) as *const u8, state);
            }
            Storage::Foreign(array) => std::ptr::hash(Arc::as_ptr(array) as *const u8, state),
            Storage::Persistent(_) | Storage::Packed(_) => {}
        }
    }
}

fn write_elements<'a>(
    f: &mut fmt::Formatter<'_>,
    elements: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, elem) in elements.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{elem}")?;
    }
    write!(f, "]")
}

impl fmt::Display for SequenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.storage {
            Storage::Persistent(values) => write_elements(f, values.iter()),
            Storage::Packed(values) => write_elements(f, values.iter()),
            Storage::Host(values) => write!(f, "<host vector of length {}>", values.len()),
            Storage::Proxy(proxy) => write!(f, "<proxy vector of length {}>", proxy.length),
            Storage::Foreign(array) => write!(f, "<foreign {}>", array.type_name()),
        }
    }
}

/// Uniform length/read capability across storages.
///
/// Implementations must be stateless and safe to share between threads.
pub trait RepresentationBridge: Send + Sync {
    /// Number of elements; fails only when the backing breaks its contract
    fn length(&self, seq: &SequenceValue) -> Result<usize, RuntimeError>;

    fn read_at(&self, seq: &SequenceValue, index: usize) -> Result<HostValue, ReadError>;
}

/// Default bridge, dispatching on the storage tag
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageBridge;

impl RepresentationBridge for StorageBridge {
    fn length(&self, seq: &SequenceValue) -> Result<usize, RuntimeError> {
        match &seq.storage {
            Storage::Persistent(values) => Ok(values.len()),
            Storage::Packed(values) => Ok(values.len()),
            Storage::Host(values) => Ok(values.len()),
            Storage::Proxy(proxy) => Ok(proxy.length),
            Storage::Foreign(array) => {
                let size = array
                    .array_size()
                    .map_err(|err| RuntimeError::bridge_violation(array.type_name(), err.to_string()))?;
                usize::try_from(size).map_err(|_| {
                    RuntimeError::bridge_violation(
                        array.type_name(),
                        format!("array_size reported negative length {size}"),
                    )
                })
            }
        }
    }

    fn read_at(&self, seq: &SequenceValue, index: usize) -> Result<HostValue, ReadError> {
        let invalid = || ReadError::InvalidIndex(index);
        match &seq.storage {
            Storage::Persistent(values) => values
                .get(index)
                .cloned()
                .map(HostValue::Canonical)
                .ok_or_else(invalid),
            Storage::Packed(values) => values
                .get(index)
                .cloned()
                .map(HostValue::Canonical)
                .ok_or_else(invalid),
            Storage::Host(values) => values.get(index).cloned().ok_or_else(invalid),
            Storage::Proxy(proxy) => {
                if index < proxy.length {
                    Ok(HostValue::Canonical((proxy.element)(index)))
                } else {
                    Err(invalid())
                }
            }
            Storage::Foreign(array) => array.read_array_element(index),
        }
    }
}
