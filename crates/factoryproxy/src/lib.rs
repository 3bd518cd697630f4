//! Cross-runtime factory proxy descriptors.
//!
//! A factory proxy asks a remote runtime to construct an object by invoking a
//! named factory, instead of serializing the object itself.
//!
//! # Crate Structure
//!
//! - [`binary`]: Raw field writer/reader traits and the in-memory object codec
//! - [`descriptor`]: The descriptor type, its wire encoder and a reference decoder
//!
//! ```
//! use factoryproxy::binary::Value;
//! use factoryproxy::descriptor::FactoryDescriptor;
//!
//! let descriptor = FactoryDescriptor::default_factory(
//!     "built-in-cache-factory",
//!     Some(Value::map([("size", 10)])),
//! )
//! .unwrap();
//! let bytes = descriptor.to_bytes().unwrap();
//! assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
//! ```

/// Re-export binary codec types.
pub mod binary {
    pub use factoryproxy_binary::*;
}

/// Re-export descriptor types.
pub mod descriptor {
    pub use factoryproxy_descriptor::*;
}
