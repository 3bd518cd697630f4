/// Errors that can occur while writing or reading binary fields.
#[derive(Debug, thiserror::Error)]
pub enum BinaryError {
    /// The object graph nests deeper than the configured limit.
    #[error("object graph exceeds max depth ({max})")]
    DepthExceeded { max: usize },

    /// A string, byte array or container length does not fit the wire limit.
    #[error("length {len} exceeds limit ({max})")]
    LengthOverflow { len: usize, max: usize },

    /// The input ended before a complete field was read.
    #[error("unexpected end of input (needed {needed} bytes, {remaining} remaining)")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// An object node starts with a type code this codec does not know.
    #[error("unknown type code {0}")]
    UnknownTypeCode(u8),

    /// A field was expected to have a specific type but carried another.
    #[error("expected {expected}, found type code {found}")]
    UnexpectedTypeCode { expected: &'static str, found: u8 },

    /// A length prefix on the wire is negative.
    #[error("negative length prefix ({0})")]
    NegativeLength(i32),

    /// String bytes are not valid UTF-8.
    #[error("string is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A bool byte is neither 0 nor 1.
    #[error("invalid bool byte {0:#04x}")]
    InvalidBool(u8),

    /// A collection node carries an unknown collection kind.
    #[error("unknown collection kind {0}")]
    UnknownCollectionKind(i8),

    /// A map node carries an unknown map kind.
    #[error("unknown map kind {0}")]
    UnknownMapKind(i8),
}

pub type Result<T> = std::result::Result<T, BinaryError>;
