pub mod annotation;
pub mod builtins;
pub mod dataflow;
pub mod host;
pub mod storage;
pub mod value;

// Re-export commonly used types
pub use annotation::{Annotated, Annotation, AnnotationCarrier, ValueAnnotations};
pub use builtins::{normalize_index, vector_at, VectorAt};
pub use dataflow::{BuiltinErrors, DataflowError, ErrorCause, ErrorFactory, ErrorKind};
pub use host::{CanonicalValueAdapter, HostConverter, HostValue};
pub use storage::{ArrayProxy, ForeignArray, ReadError, RepresentationBridge, SequenceValue, StorageBridge};
pub use value::Value;
