use bytes::{Buf, Bytes};

use crate::config::CodecConfig;
use crate::error::{BinaryError, Result};
use crate::traits::RawReader;
use crate::types;
use crate::value::Value;

/// Reads raw fields from an in-memory buffer.
///
/// Bytes past the last field read are left untouched; use
/// [`remaining`](Self::remaining) to inspect them.
#[derive(Debug)]
pub struct BinaryReader {
    buf: Bytes,
    config: CodecConfig,
}

impl BinaryReader {
    /// Create a new reader with default configuration.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self::with_config(data, CodecConfig::default())
    }

    /// Create a new reader with explicit configuration.
    pub fn with_config(data: impl Into<Bytes>, config: CodecConfig) -> Self {
        Self {
            buf: data.into(),
            config,
        }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Current reader configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.buf.remaining();
        if remaining < needed {
            return Err(BinaryError::UnexpectedEof { needed, remaining });
        }
        Ok(())
    }

    fn get_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    fn get_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.buf.get_i32_le())
    }

    fn get_len(&mut self) -> Result<usize> {
        let raw = self.get_i32()?;
        if raw < 0 {
            return Err(BinaryError::NegativeLength(raw));
        }
        let len = raw as usize;
        let max = self.config.length_limit();
        if len > max {
            return Err(BinaryError::LengthOverflow { len, max });
        }
        Ok(len)
    }

    fn get_bytes(&mut self, len: usize) -> Result<Bytes> {
        self.ensure(len)?;
        Ok(self.buf.split_to(len))
    }

    fn get_str_body(&mut self) -> Result<String> {
        let len = self.get_len()?;
        let raw = self.get_bytes(len)?;
        Ok(String::from_utf8(raw.to_vec())?)
    }

    fn get_value(&mut self, depth: usize) -> Result<Value> {
        let code = self.get_u8()?;
        let value = match code {
            types::NULL => Value::Null,
            types::BOOL => match self.get_u8()? {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                other => return Err(BinaryError::InvalidBool(other)),
            },
            types::BYTE => {
                self.ensure(1)?;
                Value::Byte(self.buf.get_i8())
            }
            types::SHORT => {
                self.ensure(2)?;
                Value::Short(self.buf.get_i16_le())
            }
            types::INT => Value::Int(self.get_i32()?),
            types::LONG => {
                self.ensure(8)?;
                Value::Long(self.buf.get_i64_le())
            }
            types::FLOAT => {
                self.ensure(4)?;
                Value::Float(self.buf.get_f32_le())
            }
            types::DOUBLE => {
                self.ensure(8)?;
                Value::Double(self.buf.get_f64_le())
            }
            types::CHAR => {
                self.ensure(2)?;
                Value::Char(self.buf.get_u16_le())
            }
            types::STRING => Value::String(self.get_str_body()?),
            types::BYTE_ARR => {
                let len = self.get_len()?;
                Value::ByteArray(self.get_bytes(len)?)
            }
            types::COL => {
                let depth = self.config.enter_container(depth)?;
                let len = self.get_len()?;
                let kind = self.get_u8()? as i8;
                if !types::is_known_collection_kind(kind) {
                    return Err(BinaryError::UnknownCollectionKind(kind));
                }
                // Every element takes at least one byte.
                let mut items = Vec::with_capacity(len.min(self.buf.remaining()));
                for _ in 0..len {
                    items.push(self.get_value(depth)?);
                }
                Value::Collection(items)
            }
            types::MAP => {
                let depth = self.config.enter_container(depth)?;
                let len = self.get_len()?;
                let kind = self.get_u8()? as i8;
                if !types::is_known_map_kind(kind) {
                    return Err(BinaryError::UnknownMapKind(kind));
                }
                let mut entries = Vec::with_capacity(len.min(self.buf.remaining() / 2));
                for _ in 0..len {
                    let key = self.get_value(depth)?;
                    let val = self.get_value(depth)?;
                    entries.push((key, val));
                }
                Value::Map(entries)
            }
            other => return Err(BinaryError::UnknownTypeCode(other)),
        };
        Ok(value)
    }
}

impl RawReader for BinaryReader {
    type Error = BinaryError;

    fn read_int(&mut self) -> Result<i32> {
        self.get_i32()
    }

    fn read_string(&mut self) -> Result<Option<String>> {
        match self.get_u8()? {
            types::NULL => Ok(None),
            types::STRING => self.get_str_body().map(Some),
            found => Err(BinaryError::UnexpectedTypeCode {
                expected: "string",
                found,
            }),
        }
    }

    fn read_object(&mut self) -> Result<Value> {
        self.get_value(0)
    }
}
