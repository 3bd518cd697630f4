use bytes::{BufMut, Bytes, BytesMut};

use crate::config::CodecConfig;
use crate::error::{BinaryError, Result};
use crate::traits::RawWriter;
use crate::types;
use crate::value::Value;

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Writes raw fields into an in-memory buffer.
///
/// A failed write leaves the buffer holding a partial field; callers must
/// discard the whole buffer in that case.
#[derive(Debug)]
pub struct BinaryWriter {
    buf: BytesMut,
    config: CodecConfig,
}

impl Default for BinaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryWriter {
    /// Create a new writer with default configuration.
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Create a new writer with explicit configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drop everything written so far.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Consume the writer and return the written bytes.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    /// Current writer configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn put_len(&mut self, len: usize) -> Result<()> {
        let max = self.config.length_limit();
        if len > max {
            return Err(BinaryError::LengthOverflow { len, max });
        }
        self.buf.put_i32_le(len as i32);
        Ok(())
    }

    fn put_str(&mut self, value: &str) -> Result<()> {
        self.buf.put_u8(types::STRING);
        self.put_len(value.len())?;
        self.buf.put_slice(value.as_bytes());
        Ok(())
    }

    fn put_value(&mut self, value: &Value, depth: usize) -> Result<()> {
        match value {
            Value::Null => self.buf.put_u8(types::NULL),
            Value::Bool(v) => {
                self.buf.put_u8(types::BOOL);
                self.buf.put_u8(u8::from(*v));
            }
            Value::Byte(v) => {
                self.buf.put_u8(types::BYTE);
                self.buf.put_i8(*v);
            }
            Value::Short(v) => {
                self.buf.put_u8(types::SHORT);
                self.buf.put_i16_le(*v);
            }
            Value::Int(v) => {
                self.buf.put_u8(types::INT);
                self.buf.put_i32_le(*v);
            }
            Value::Long(v) => {
                self.buf.put_u8(types::LONG);
                self.buf.put_i64_le(*v);
            }
            Value::Float(v) => {
                self.buf.put_u8(types::FLOAT);
                self.buf.put_f32_le(*v);
            }
            Value::Double(v) => {
                self.buf.put_u8(types::DOUBLE);
                self.buf.put_f64_le(*v);
            }
            Value::Char(v) => {
                self.buf.put_u8(types::CHAR);
                self.buf.put_u16_le(*v);
            }
            Value::String(s) => self.put_str(s)?,
            Value::ByteArray(data) => {
                self.buf.put_u8(types::BYTE_ARR);
                self.put_len(data.len())?;
                self.buf.put_slice(data);
            }
            Value::Collection(items) => {
                let depth = self.config.enter_container(depth)?;
                self.buf.put_u8(types::COL);
                self.put_len(items.len())?;
                self.buf.put_i8(types::COL_ARRAY_LIST);
                for item in items {
                    self.put_value(item, depth)?;
                }
            }
            Value::Map(entries) => {
                let depth = self.config.enter_container(depth)?;
                self.buf.put_u8(types::MAP);
                self.put_len(entries.len())?;
                self.buf.put_i8(types::MAP_LINKED_HASH_MAP);
                for (key, val) in entries {
                    self.put_value(key, depth)?;
                    self.put_value(val, depth)?;
                }
            }
        }
        Ok(())
    }
}

impl RawWriter for BinaryWriter {
    type Error = BinaryError;

    fn write_int(&mut self, value: i32) -> Result<()> {
        self.buf.put_i32_le(value);
        Ok(())
    }

    fn write_string(&mut self, value: Option<&str>) -> Result<()> {
        match value {
            Some(s) => self.put_str(s),
            None => {
                self.buf.put_u8(types::NULL);
                Ok(())
            }
        }
    }

    fn write_object(&mut self, value: &Value) -> Result<()> {
        self.put_value(value, 0)
    }
}
