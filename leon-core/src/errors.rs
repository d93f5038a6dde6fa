//! errors.rs - Custom error types for the leon-core library.
//!
//! Rule problems are reported when a rule is created or loaded, never while
//! cleaning. Registry mutations that target a missing or built-in sanitizer
//! get their own error type so callers can tell the two apart.
//!
//! License: GPL-3.0-or-later

use thiserror::Error;

/// A user-supplied rule that cannot become a sanitizer.
///
/// Marked `#[non_exhaustive]` so new validation failures can be added without
/// breaking downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InvalidRuleError {
    #[error("Failed to compile sanitizer rule '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Rule '{0}' has an empty `pattern` field.")]
    EmptyPattern(String),

    #[error("Rule '{0}' has an empty `parameter_name` field.")]
    EmptyParameterName(String),

    #[error("Rule '{0}' is missing the `{1}` field required by its kind.")]
    MissingValue(String, &'static str),

    #[error("A rule has an empty `name` field.")]
    EmptyName,

    #[error("Duplicate rule name found: '{0}'.")]
    DuplicateName(String),
}

impl InvalidRuleError {
    /// Name of the offending rule, when it has one.
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            InvalidRuleError::InvalidPattern { name, .. } => Some(name),
            InvalidRuleError::PatternLengthExceeded(name, _, _)
            | InvalidRuleError::EmptyPattern(name)
            | InvalidRuleError::EmptyParameterName(name)
            | InvalidRuleError::MissingValue(name, _)
            | InvalidRuleError::DuplicateName(name) => Some(name),
            InvalidRuleError::EmptyName => None,
        }
    }
}

/// Failures of the registry mutation surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("No sanitizer named '{0}' exists.")]
    UnknownSanitizer(String),

    #[error("Sanitizer '{0}' is built in and cannot be removed or disabled.")]
    BuiltinImmutable(String),
}
