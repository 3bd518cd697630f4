use crate::error::BinaryError;

/// Default maximum nesting depth of an object graph.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum length of a single string, byte array or container: 16 MiB.
pub const DEFAULT_MAX_LENGTH: usize = 16 * 1024 * 1024;

/// Limits applied by [`BinaryWriter`](crate::BinaryWriter) and
/// [`BinaryReader`](crate::BinaryReader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum nesting depth of collections and maps. Default: 64.
    ///
    /// Scalars do not count, so `0` still allows a scalar or null object.
    pub max_depth: usize,
    /// Maximum element count or byte length of one node. Default: 16 MiB.
    pub max_length: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl CodecConfig {
    /// Effective length limit, never above what an `int32` prefix can carry.
    pub fn length_limit(&self) -> usize {
        self.max_length.min(i32::MAX as usize)
    }

    /// Depth of a container opened inside `depth` enclosing containers.
    pub(crate) fn enter_container(&self, depth: usize) -> Result<usize, BinaryError> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(BinaryError::DepthExceeded {
                max: self.max_depth,
            });
        }
        Ok(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CodecConfig::default();
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(cfg.max_length, DEFAULT_MAX_LENGTH);
    }

    #[test]
    fn length_limit_is_capped_by_int32() {
        let cfg = CodecConfig {
            max_length: usize::MAX,
            ..CodecConfig::default()
        };
        assert_eq!(cfg.length_limit(), i32::MAX as usize);
    }
}
