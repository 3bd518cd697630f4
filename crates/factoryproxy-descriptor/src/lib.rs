//! Factory proxy descriptors.
//!
//! A descriptor tells a remote runtime to build an object by invoking a named
//! factory instead of shipping the object itself. On the wire it is four
//! positional fields, written through a [`RawWriter`](factoryproxy_binary::RawWriter):
//!
//! ```text
//! ┌──────────────┬──────────────────┬────────────────┬────────────────┐
//! │ kind (int32) │ class (string)   │ payload (obj)  │ reserved (i32) │
//! │ 0=User       │ factory name     │ may be null    │ always 0       │
//! │ 1=Default    │                  │                │                │
//! └──────────────┴──────────────────┴────────────────┴────────────────┘
//! ```
//!
//! The fields are not self-delimiting; the enclosing frame decides where the
//! descriptor ends.

pub mod decoder;
pub mod descriptor;
pub mod encoder;
pub mod error;

pub use decoder::{decode, decode_bytes, DecodedFactory, FactoryResolver};
pub use descriptor::{
    FactoryDescriptor, FactoryKind, FactoryTarget, MAX_CLASS_NAME_LEN, RESERVED_FIELD_VALUE,
};
pub use encoder::{encode, encode_to_bytes};
pub use error::{DecodeError, DescriptorError};
