//! Raw binary field writer/reader for cross-runtime descriptors.
//!
//! Every value on the wire is little-endian:
//! - raw `int32` fields are written as 4 bytes with no type tag
//! - strings carry a 1-byte type tag, a 4-byte length and UTF-8 bytes
//! - objects are written recursively, each node prefixed by its type code
//!
//! Code that emits descriptors only depends on the [`RawWriter`] and
//! [`RawReader`] traits; [`BinaryWriter`] and [`BinaryReader`] are the
//! in-memory implementations.

pub mod capture;
pub mod config;
pub mod error;
pub mod reader;
pub mod traits;
pub mod types;
pub mod value;
pub mod writer;

pub use capture::{Field, FieldRecorder, FieldReplay, ReplayError};
pub use config::{CodecConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LENGTH};
pub use error::{BinaryError, Result};
pub use reader::BinaryReader;
pub use traits::{RawReader, RawWriter};
pub use value::Value;
pub use writer::BinaryWriter;
