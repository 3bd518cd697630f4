use bytes::Bytes;
use factoryproxy_binary::{BinaryError, BinaryWriter, CodecConfig, RawWriter};
use tracing::trace;

use crate::descriptor::{FactoryDescriptor, RESERVED_FIELD_VALUE};

/// Write a descriptor as its four positional fields.
///
/// Writer errors are returned unchanged. On error the writer holds a partial
/// descriptor and must be discarded by the caller.
pub fn encode<W: RawWriter + ?Sized>(
    descriptor: &FactoryDescriptor,
    writer: &mut W,
) -> Result<(), W::Error> {
    trace!(
        kind = %descriptor.kind(),
        class_name = descriptor.class_name(),
        "encoding factory descriptor"
    );

    writer.write_int(descriptor.kind().code())?;
    writer.write_string(Some(descriptor.class_name()))?;
    writer.write_object(descriptor.wire_payload())?;
    writer.write_int(RESERVED_FIELD_VALUE)
}

/// Encode a descriptor into a fresh buffer.
pub fn encode_to_bytes(
    descriptor: &FactoryDescriptor,
    config: &CodecConfig,
) -> Result<Bytes, BinaryError> {
    let mut writer = BinaryWriter::with_config(*config);
    encode(descriptor, &mut writer)?;
    Ok(writer.into_bytes())
}

impl FactoryDescriptor {
    /// Encode with the default codec configuration.
    pub fn to_bytes(&self) -> Result<Bytes, BinaryError> {
        encode_to_bytes(self, &CodecConfig::default())
    }
}
