//! Configuration for property conversion and definition resolution
//!
//! This module provides the options that govern how lenient property writes are when a value
//! does not already have the declared type of the property, and how deep a chain of parent
//! definitions may become before resolution gives up.

/// Configuration for property accessors, copiers and the definition resolver
///
/// Exact type matches and lossless numeric widening are always accepted. Everything beyond
/// that (string parsing, constant lookup, narrowing) is controlled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct BeanConfig {
    /// Parse strings written to `bool`, `char`, integer and floating point properties
    pub parse_strings: bool,

    /// Trim surrounding whitespace from strings before parsing or constant lookup
    pub trim_strings: bool,

    /// Resolve strings written to enumerated properties by constant name
    pub lookup_constants: bool,

    /// Accept narrowing numeric conversions when the value survives them unchanged
    /// (e.g. `i64` 5 into an `i32` property, or `f64` 2.0 into an `u8` property)
    pub lossless_narrowing: bool,

    /// Maximum length of a chain of parent definitions (default: 64)
    pub max_definition_depth: usize,
}

impl Default for BeanConfig {
    fn default() -> Self {
        Self {
            parse_strings: true,
            trim_strings: true,
            lookup_constants: true,
            lossless_narrowing: false,
            max_definition_depth: 64,
        }
    }
}

impl BeanConfig {
    /// Creates a strict configuration
    ///
    /// Only exact matches and numeric widening are accepted; strings are never parsed.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            parse_strings: false,
            trim_strings: false,
            lookup_constants: false,
            lossless_narrowing: false,
            max_definition_depth: 64,
        }
    }

    /// Creates a lenient configuration
    ///
    /// Enables every conversion, including value-checked narrowing.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            parse_strings: true,
            trim_strings: true,
            lookup_constants: true,
            lossless_narrowing: true,
            max_definition_depth: 64,
        }
    }

    /// Returns a copy of this configuration with a different maximum definition depth
    #[must_use]
    pub fn with_max_definition_depth(mut self, depth: usize) -> Self {
        self.max_definition_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bean_config_presets() {
        let strict = BeanConfig::strict();
        assert!(!strict.parse_strings);
        assert!(!strict.trim_strings);
        assert!(!strict.lookup_constants);
        assert!(!strict.lossless_narrowing);

        let lenient = BeanConfig::lenient();
        assert!(lenient.parse_strings);
        assert!(lenient.lookup_constants);
        assert!(lenient.lossless_narrowing);

        let default = BeanConfig::default();
        assert!(default.parse_strings);
        assert!(!default.lossless_narrowing);
        assert_eq!(default.max_definition_depth, 64);
    }

    #[test]
    fn test_with_max_definition_depth() {
        let config = BeanConfig::default().with_max_definition_depth(3);
        assert_eq!(config.max_definition_depth, 3);
        assert!(config.parse_strings);
    }
}
