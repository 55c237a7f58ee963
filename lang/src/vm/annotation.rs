//! Advisory annotations carried alongside values.
//!
//! An annotation never changes what a value *is*: equality and hashing of
//! [`Value`] look straight through [`Annotated`]. Consumers that care about
//! annotations ask an [`AnnotationCarrier`] for them explicitly.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::value::Value;

static NEXT_ANNOTATION_ID: AtomicU64 = AtomicU64::new(0);

/// A single piece of advisory metadata.
///
/// Annotations are compared by identity: every call to [`Annotation::new`]
/// yields a distinct annotation, even for equal payloads.
#[derive(Debug, Clone)]
pub struct Annotation {
    id: u64,
    payload: Value,
    origin: Option<Arc<str>>,
}

impl Annotation {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self {
            id: NEXT_ANNOTATION_ID.fetch_add(1, Ordering::Relaxed),
            payload: payload.into(),
            origin: None,
        }
    }

    /// Label the place that raised the annotation
    pub fn with_origin(mut self, origin: impl Into<Arc<str>>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Annotation {}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "{} (from {})", self.payload, origin),
            None => write!(f, "{}", self.payload),
        }
    }
}

/// Payload plus its ordered, duplicate-free annotation list
#[derive(Debug, Clone)]
pub struct Annotated {
    value: Value,
    annotations: Vec<Annotation>,
}

impl Annotated {
    pub(crate) fn new(value: Value, annotations: Vec<Annotation>) -> Self {
        debug_assert!(!matches!(value, Value::Annotated(_)));
        Self { value, annotations }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub(crate) fn contains(&self, annotation: &Annotation) -> bool {
        self.annotations.contains(annotation)
    }

    pub(crate) fn push(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }
}

/// Capability to inspect annotations without knowing how a value is built
pub trait AnnotationCarrier: Send + Sync {
    fn has_annotations(&self, value: &Value) -> bool;

    /// Annotations in attachment order; empty if none
    fn annotations_of(&self, value: &Value) -> Vec<Annotation>;
}

/// Default carrier over [`Value::Annotated`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueAnnotations;

impl AnnotationCarrier for ValueAnnotations {
    fn has_annotations(&self, value: &Value) -> bool {
        match value {
            Value::Annotated(annotated) => !annotated.annotations().is_empty(),
            _ => false,
        }
    }

    fn annotations_of(&self, value: &Value) -> Vec<Annotation> {
        match value {
            Value::Annotated(annotated) => annotated.annotations().to_vec(),
            _ => Vec::new(),
        }
    }
}
