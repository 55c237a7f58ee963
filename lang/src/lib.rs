//! Indexed element access for immutable sequences in a dataflow interpreter runtime.
//!
//! The entry point is [`vm::VectorAt`], which reads one element of a
//! [`vm::SequenceValue`] regardless of its backing storage. Out-of-range reads
//! produce a [`vm::Value::Error`] that flows onward like any other value;
//! only a backing that breaks its own contract surfaces as a [`RuntimeError`].

pub mod config;
pub mod error;
pub mod vm;

pub use config::RuntimeConfig;
pub use error::{RuntimeError, StackFrame};
