use std::fmt;

use factoryproxy_binary::Value;

use crate::error::DescriptorError;

/// Value of the fourth wire field in this revision.
///
/// Decoders read it as a count of trailing key/value properties; encoders
/// never emit anything but zero.
pub const RESERVED_FIELD_VALUE: i32 = 0;

/// Maximum factory name length in bytes.
pub const MAX_CLASS_NAME_LEN: usize = 1024;

/// How the remote side resolves the factory name.
///
/// The discriminants are the wire codes and are never reassigned.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactoryKind {
    /// Fully-qualified class name of a user factory.
    User = 0,
    /// Identifier of a factory built into the remote runtime.
    Default = 1,
}

impl FactoryKind {
    /// Wire code of this kind.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Kind for a wire code, or `None` for unassigned codes.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FactoryKind::User),
            1 => Some(FactoryKind::Default),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FactoryKind::User => "user",
            FactoryKind::Default => "default",
        }
    }
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The factory to invoke: a kind together with the name it is resolved by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FactoryTarget {
    /// Fully-qualified factory class name, e.g. `com.example.MyFactory`.
    User(String),
    /// Built-in factory identifier, e.g. `built-in-cache-factory`.
    Default(String),
}

impl FactoryTarget {
    /// Build a target from a kind and a name.
    pub fn new(kind: FactoryKind, class_name: impl Into<String>) -> Self {
        match kind {
            FactoryKind::User => FactoryTarget::User(class_name.into()),
            FactoryKind::Default => FactoryTarget::Default(class_name.into()),
        }
    }

    pub fn kind(&self) -> FactoryKind {
        match self {
            FactoryTarget::User(_) => FactoryKind::User,
            FactoryTarget::Default(_) => FactoryKind::Default,
        }
    }

    pub fn class_name(&self) -> &str {
        match self {
            FactoryTarget::User(name) | FactoryTarget::Default(name) => name,
        }
    }

    /// Check the name against the rules of its kind.
    ///
    /// `User` names are dotted JVM binary names (`com.example.Outer$Inner`).
    /// `Default` names are ASCII identifiers made of letters, digits, `.`,
    /// `_` and `-`.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        let name = self.class_name();
        if name.is_empty() {
            return Err(DescriptorError::EmptyClassName);
        }
        if name.len() > MAX_CLASS_NAME_LEN {
            return Err(DescriptorError::ClassNameTooLong {
                len: name.len(),
                max: MAX_CLASS_NAME_LEN,
            });
        }

        let reason = match self {
            FactoryTarget::User(name) => check_binary_name(name),
            FactoryTarget::Default(name) => check_builtin_id(name),
        };

        match reason {
            None => Ok(()),
            Some(reason) => Err(DescriptorError::InvalidClassName {
                kind: self.kind(),
                name: name.to_string(),
                reason,
            }),
        }
    }
}

fn check_binary_name(name: &str) -> Option<&'static str> {
    for segment in name.split('.') {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            return Some("empty name segment");
        };
        if !(first.is_alphabetic() || first == '_' || first == '$') {
            return Some("segment must start with a letter, '_' or '$'");
        }
        if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
            return Some("segment may only contain letters, digits, '_' and '$'");
        }
    }
    None
}

fn check_builtin_id(name: &str) -> Option<&'static str> {
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '$'));
    if valid {
        None
    } else {
        Some("identifier may only contain ASCII letters, digits, '.', '_', '-' and '$'")
    }
}

/// Instruction to construct an object remotely through a named factory.
///
/// Immutable once built; every constructor validates the factory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryDescriptor {
    target: FactoryTarget,
    /// `Value::Null` when absent.
    payload: Value,
}

impl FactoryDescriptor {
    /// Create a descriptor, validating the target name.
    ///
    /// `Some(Value::Null)` is treated the same as `None`.
    pub fn new(target: FactoryTarget, payload: Option<Value>) -> Result<Self, DescriptorError> {
        target.validate()?;
        Ok(Self {
            target,
            payload: payload.unwrap_or_default(),
        })
    }

    /// Descriptor for a user factory class.
    pub fn user(
        class_name: impl Into<String>,
        payload: Option<Value>,
    ) -> Result<Self, DescriptorError> {
        Self::new(FactoryTarget::User(class_name.into()), payload)
    }

    /// Descriptor for a built-in factory.
    pub fn default_factory(
        id: impl Into<String>,
        payload: Option<Value>,
    ) -> Result<Self, DescriptorError> {
        Self::new(FactoryTarget::Default(id.into()), payload)
    }

    pub fn target(&self) -> &FactoryTarget {
        &self.target
    }

    pub fn kind(&self) -> FactoryKind {
        self.target.kind()
    }

    pub fn class_name(&self) -> &str {
        self.target.class_name()
    }

    /// Payload handed to the factory, if any.
    pub fn payload(&self) -> Option<&Value> {
        if self.payload.is_null() {
            None
        } else {
            Some(&self.payload)
        }
    }

    /// Value of the reserved field; always [`RESERVED_FIELD_VALUE`].
    pub fn reserved(&self) -> i32 {
        RESERVED_FIELD_VALUE
    }

    /// Payload as written on the wire, `Value::Null` when absent.
    pub(crate) fn wire_payload(&self) -> &Value {
        &self.payload
    }
}
