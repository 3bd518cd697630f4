use crate::descriptor::FactoryKind;

/// Errors raised when building a descriptor from an invalid factory name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// The factory name is empty.
    #[error("factory class name is empty")]
    EmptyClassName,

    /// The factory name exceeds [`MAX_CLASS_NAME_LEN`](crate::MAX_CLASS_NAME_LEN).
    #[error("factory class name is {len} bytes (max {max})")]
    ClassNameTooLong { len: usize, max: usize },

    /// The factory name is not well-formed for its kind.
    #[error("invalid {kind} factory name {name:?}: {reason}")]
    InvalidClassName {
        kind: FactoryKind,
        name: String,
        reason: &'static str,
    },
}

/// Errors raised while decoding a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The kind field holds a code with no assigned meaning.
    #[error("unknown factory kind code {0}")]
    UnknownKind(i32),

    /// The class name field is null.
    #[error("factory class name is null")]
    MissingClassName,

    /// The class name is present but malformed.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// The reserved field holds a negative property count.
    #[error("negative reserved property count ({0})")]
    NegativePropertyCount(i32),

    /// A reserved property carries a null key.
    #[error("reserved property {index} has a null key")]
    NullPropertyKey { index: usize },

    /// The underlying field reader failed.
    #[error("field read failed: {0}")]
    Reader(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DecodeError {
    pub(crate) fn reader<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Reader(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
