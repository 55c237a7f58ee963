use std::fmt;
use thiserror::Error;

/// Fatal runtime failure.
///
/// Recoverable conditions never use this type; they are returned as
/// [`crate::vm::Value::Error`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A backing storage disagreed with its own length/read contract
    #[error("{storage} storage violated its access contract: {reason}")]
    BridgeViolation {
        storage: &'static str,
        reason: String,
    },
}

impl RuntimeError {
    pub fn bridge_violation(storage: &'static str, reason: impl Into<String>) -> Self {
        RuntimeError::BridgeViolation {
            storage,
            reason: reason.into(),
        }
    }
}

/// One frame of a captured diagnostic trace, innermost first
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackFrame {
    pub function_name: Option<String>,
    pub line: u32,
}

impl StackFrame {
    pub fn named(function_name: impl Into<String>, line: u32) -> Self {
        Self {
            function_name: Some(function_name.into()),
            line,
        }
    }

    pub fn anonymous(line: u32) -> Self {
        Self {
            function_name: None,
            line,
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function_name {
            Some(name) => write!(f, "{} (line {})", name, self.line),
            None => write!(f, "<anonymous> (line {})", self.line),
        }
    }
}

/// Render frames as a `Stack trace:` block, or nothing when empty
pub fn format_stack_trace(frames: &[StackFrame]) -> String {
    let mut output = String::new();
    if frames.is_empty() {
        return output;
    }

    output.push_str("Stack trace:\n");
    for (i, frame) in frames.iter().enumerate() {
        output.push_str(&format!("  {} at {}\n", i, frame));
    }
    output
}
