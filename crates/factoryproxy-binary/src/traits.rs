use crate::value::Value;

/// Primitive field writer.
///
/// Each call appends one positional field. Fields carry no names, so the
/// order of calls is the wire contract.
pub trait RawWriter {
    /// Error raised when a field cannot be written.
    type Error;

    /// Write a raw signed 32-bit integer.
    fn write_int(&mut self, value: i32) -> Result<(), Self::Error>;

    /// Write a nullable string.
    fn write_string(&mut self, value: Option<&str>) -> Result<(), Self::Error>;

    /// Write an object graph, `Value::Null` included.
    fn write_object(&mut self, value: &Value) -> Result<(), Self::Error>;
}

/// Primitive field reader, the mirror of [`RawWriter`].
pub trait RawReader {
    /// Error raised when a field cannot be read.
    type Error: std::error::Error + Send + Sync + 'static;

    fn read_int(&mut self) -> Result<i32, Self::Error>;

    fn read_string(&mut self) -> Result<Option<String>, Self::Error>;

    fn read_object(&mut self) -> Result<Value, Self::Error>;
}

impl<W: RawWriter + ?Sized> RawWriter for &mut W {
    type Error = W::Error;

    fn write_int(&mut self, value: i32) -> Result<(), Self::Error> {
        (**self).write_int(value)
    }

    fn write_string(&mut self, value: Option<&str>) -> Result<(), Self::Error> {
        (**self).write_string(value)
    }

    fn write_object(&mut self, value: &Value) -> Result<(), Self::Error> {
        (**self).write_object(value)
    }
}

impl<R: RawReader + ?Sized> RawReader for &mut R {
    type Error = R::Error;

    fn read_int(&mut self) -> Result<i32, Self::Error> {
        (**self).read_int()
    }

    fn read_string(&mut self) -> Result<Option<String>, Self::Error> {
        (**self).read_string()
    }

    fn read_object(&mut self) -> Result<Value, Self::Error> {
        (**self).read_object()
    }
}
