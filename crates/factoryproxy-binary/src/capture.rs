//! Field-level capture and replay.
//!
//! [`FieldRecorder`] records the sequence of raw writer calls instead of
//! bytes, and [`FieldReplay`] feeds such a sequence back through the
//! [`RawReader`] interface.

use std::collections::VecDeque;
use std::convert::Infallible;

use crate::traits::{RawReader, RawWriter};
use crate::value::Value;

/// One positional field as seen by a [`RawWriter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Int(i32),
    String(Option<String>),
    Object(Value),
}

impl Field {
    /// Wire type of the field.
    pub fn type_name(&self) -> &'static str {
        match self {
            Field::Int(_) => "int32",
            Field::String(_) => "string",
            Field::Object(_) => "object",
        }
    }
}

/// A [`RawWriter`] that records fields in call order. Never fails.
#[derive(Debug, Clone, Default)]
pub struct FieldRecorder {
    fields: Vec<Field>,
}

impl FieldRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields recorded so far.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl RawWriter for FieldRecorder {
    type Error = Infallible;

    fn write_int(&mut self, value: i32) -> Result<(), Infallible> {
        self.fields.push(Field::Int(value));
        Ok(())
    }

    fn write_string(&mut self, value: Option<&str>) -> Result<(), Infallible> {
        self.fields.push(Field::String(value.map(str::to_string)));
        Ok(())
    }

    fn write_object(&mut self, value: &Value) -> Result<(), Infallible> {
        self.fields.push(Field::Object(value.clone()));
        Ok(())
    }
}

/// Errors raised by [`FieldReplay`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ReplayError {
    /// No fields are left to read.
    #[error("no more fields to replay")]
    Exhausted,

    /// The next field has a different type than the one requested.
    #[error("expected {expected} field, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// A [`RawReader`] over a recorded field sequence.
#[derive(Debug, Clone, Default)]
pub struct FieldReplay {
    fields: VecDeque<Field>,
}

impl FieldReplay {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Number of fields not yet read.
    pub fn remaining(&self) -> usize {
        self.fields.len()
    }

    fn mismatch(&mut self, expected: &'static str, field: Field) -> ReplayError {
        let found = field.type_name();
        self.fields.push_front(field);
        ReplayError::TypeMismatch { expected, found }
    }
}

impl From<FieldRecorder> for FieldReplay {
    fn from(recorder: FieldRecorder) -> Self {
        Self::new(recorder.into_fields())
    }
}

impl RawReader for FieldReplay {
    type Error = ReplayError;

    fn read_int(&mut self) -> Result<i32, ReplayError> {
        match self.fields.pop_front() {
            Some(Field::Int(v)) => Ok(v),
            Some(other) => Err(self.mismatch("int32", other)),
            None => Err(ReplayError::Exhausted),
        }
    }

    fn read_string(&mut self) -> Result<Option<String>, ReplayError> {
        match self.fields.pop_front() {
            Some(Field::String(v)) => Ok(v),
            Some(other) => Err(self.mismatch("string", other)),
            None => Err(ReplayError::Exhausted),
        }
    }

    fn read_object(&mut self) -> Result<Value, ReplayError> {
        match self.fields.pop_front() {
            Some(Field::Object(v)) => Ok(v),
            Some(other) => Err(self.mismatch("object", other)),
            None => Err(ReplayError::Exhausted),
        }
    }
}
