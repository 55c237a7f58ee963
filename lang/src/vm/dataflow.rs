//! Dataflow errors: failures represented as ordinary values.
//!
//! Recoverable conditions are built through [`ErrorFactory`] and returned
//! inside [`Value::Error`](super::Value::Error). The cheap path skips trace
//! capture entirely; the rich path keeps a bounded list of frames.

use std::fmt;

use crate::config::RuntimeConfig;
use crate::error::{format_stack_trace, StackFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IndexOutOfBounds,
    UnrepresentableHostValue,
    Internal,
}

/// What went wrong, with the data needed to report it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCause {
    /// `index` is the index as the caller passed it, before normalization
    IndexOutOfBounds { index: i64, length: usize },
    UnrepresentableHostValue {
        host_type: &'static str,
        detail: String,
    },
    Internal { message: String },
}

impl ErrorCause {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCause::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            ErrorCause::UnrepresentableHostValue { .. } => ErrorKind::UnrepresentableHostValue,
            ErrorCause::Internal { .. } => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCause::IndexOutOfBounds { index, length } => write!(
                f,
                "Index {} is out of bounds for a vector of length {}",
                index, length
            ),
            ErrorCause::UnrepresentableHostValue { host_type, detail } => {
                write!(f, "Cannot represent host {} value: {}", host_type, detail)
            }
            ErrorCause::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

/// A first-class error value
#[derive(Debug, Clone)]
pub struct DataflowError {
    cause: ErrorCause,
    trace: Option<Vec<StackFrame>>,
}

impl DataflowError {
    /// Hot-path constructor: no trace is captured
    pub fn without_trace(cause: ErrorCause) -> Self {
        Self { cause, trace: None }
    }

    pub fn with_trace(cause: ErrorCause, frames: Vec<StackFrame>) -> Self {
        Self {
            cause,
            trace: Some(frames),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.cause.kind()
    }

    pub fn cause(&self) -> &ErrorCause {
        &self.cause
    }

    pub fn trace(&self) -> Option<&[StackFrame]> {
        self.trace.as_deref()
    }

    /// Whether trace capture was skipped when this error was built
    pub fn trace_skipped(&self) -> bool {
        self.trace.is_none()
    }

    /// Message followed by the captured trace, if any
    pub fn format_trace(&self) -> String {
        let mut output = format!("{}\n", self.cause);
        if let Some(frames) = &self.trace {
            output.push_str(&format_stack_trace(frames));
        }
        output
    }
}

/// Traces are diagnostics only and do not take part in equality
impl PartialEq for DataflowError {
    fn eq(&self, other: &Self) -> bool {
        self.cause == other.cause
    }
}

impl Eq for DataflowError {}

impl fmt::Display for DataflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cause)
    }
}

pub trait ErrorFactory: Send + Sync {
    /// Expected, recoverable condition; must not capture a trace
    fn make_index_out_of_bounds(&self, index: i64, length: usize) -> DataflowError;

    /// Unexpected failure reported by a collaborator; keeps a trace
    fn make_with_trace(&self, cause: ErrorCause, frames: &[StackFrame]) -> DataflowError;
}

/// Default factory; holds only read-only configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinErrors {
    config: RuntimeConfig,
}

impl BuiltinErrors {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

impl ErrorFactory for BuiltinErrors {
    fn make_index_out_of_bounds(&self, index: i64, length: usize) -> DataflowError {
        DataflowError::without_trace(ErrorCause::IndexOutOfBounds { index, length })
    }

    fn make_with_trace(&self, cause: ErrorCause, frames: &[StackFrame]) -> DataflowError {
        let kept = frames.len().min(self.config.max_trace_frames);
        DataflowError::with_trace(cause, frames[..kept].to_vec())
    }
}
