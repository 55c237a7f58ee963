//! Built-in element access for vectors.
//!
//! `at` reads one element of a sequence. Out-of-range indices produce an
//! `IndexOutOfBounds` dataflow error as the *result value*; only a backing
//! that breaks its own contract is reported through `Err`.

use std::sync::Arc;
use tracing::{debug, error, trace};

use super::dataflow::{BuiltinErrors, ErrorFactory};
use super::host::{CanonicalValueAdapter, HostConverter};
use super::storage::{ReadError, RepresentationBridge, SequenceValue, StorageBridge};
use super::value::Value;
use crate::config::RuntimeConfig;
use crate::error::RuntimeError;

/// Resolve a possibly negative index against `length`.
///
/// Returns `None` for anything outside `[0, length)`, including indices whose
/// normalization would overflow.
pub fn normalize_index(index: i64, length: usize) -> Option<usize> {
    let actual = if index < 0 {
        index.checked_add(i64::try_from(length).ok()?)?
    } else {
        index
    };
    let actual = usize::try_from(actual).ok()?;
    (actual < length).then_some(actual)
}

/// The `at` builtin, parameterized over its collaborators.
///
/// Holds no per-call state, so one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct VectorAt<B = StorageBridge, C = HostConverter, E = BuiltinErrors> {
    bridge: B,
    convert: C,
    errors: E,
}

impl VectorAt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self::with_collaborators(StorageBridge, HostConverter, BuiltinErrors::new(config))
    }
}

impl<B, C, E> VectorAt<B, C, E>
where
    B: RepresentationBridge,
    C: CanonicalValueAdapter,
    E: ErrorFactory,
{
    pub fn with_collaborators(bridge: B, convert: C, errors: E) -> Self {
        Self {
            bridge,
            convert,
            errors,
        }
    }

    /// Read the element at `index`; negative indices count from the end.
    pub fn at(&self, seq: &SequenceValue, index: i64) -> Result<Value, RuntimeError> {
        let length = self
            .bridge
            .length(seq)
            .inspect_err(|err| error!(%err, "vector length query failed"))?;

        let Some(actual) = normalize_index(index, length) else {
            return Ok(self.index_out_of_bounds(index, length));
        };

        match self.bridge.read_at(seq, actual) {
            Ok(raw) => Ok(self.convert.to_canonical(raw)),
            Err(ReadError::InvalidIndex(_)) => {
                // The backing has the final say over what is readable
                debug!(index, actual, length, "backing rejected a pre-checked index");
                Ok(self.index_out_of_bounds(index, length))
            }
            Err(ReadError::Unsupported(reason)) => {
                let err = RuntimeError::bridge_violation(seq.kind_name(), reason);
                error!(%err, index, "vector read failed");
                Err(err)
            }
        }
    }

    fn index_out_of_bounds(&self, index: i64, length: usize) -> Value {
        trace!(index, length, "vector index out of bounds");
        Value::Error(Arc::new(self.errors.make_index_out_of_bounds(index, length)))
    }
}

/// `at` with the default collaborators
pub fn vector_at(seq: &SequenceValue, index: i64) -> Result<Value, RuntimeError> {
    VectorAt::new().at(seq, index)
}
