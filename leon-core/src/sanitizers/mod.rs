//! Sanitizer rules and their compilation.
//!
//! A [`Sanitizer`] is a closed set of rule kinds. Adding a new kind means adding
//! a variant here, which keeps [`Sanitizer::apply`] exhaustive.
//!
//! * `pattern`: deletes every match of a regular expression.
//! * `parameter`: deletes one named query parameter from a URL.
//! * `compiler`: turns persisted rule records into sanitizers.

pub mod compiler;
pub mod parameter;
pub mod pattern;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SanitizerRecord;
use crate::errors::InvalidRuleError;

pub use parameter::ParameterSanitizer;
pub use pattern::PatternSanitizer;

/// The two kinds of rule a user can define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Pattern,
    Parameter,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuleKind::Pattern => write!(f, "pattern"),
            RuleKind::Parameter => write!(f, "parameter"),
        }
    }
}

/// A compiled, immutable rule that reduces a string.
#[derive(Debug, Clone)]
pub enum Sanitizer {
    Pattern(PatternSanitizer),
    Parameter(ParameterSanitizer),
}

impl Sanitizer {
    /// Builds a pattern sanitizer, compiling `pattern` up front.
    pub fn pattern(
        name: impl Into<String>,
        description: impl Into<String>,
        pattern: &str,
        is_builtin: bool,
    ) -> Result<Self, InvalidRuleError> {
        PatternSanitizer::new(name, description, pattern, is_builtin).map(Sanitizer::Pattern)
    }

    /// Builds a query parameter sanitizer. `parameter_name` must not be empty.
    pub fn parameter(
        name: impl Into<String>,
        description: impl Into<String>,
        parameter_name: impl Into<String>,
        is_builtin: bool,
    ) -> Result<Self, InvalidRuleError> {
        ParameterSanitizer::new(name, description, parameter_name, is_builtin)
            .map(Sanitizer::Parameter)
    }

    /// Runs the rule over `input`. Never fails.
    pub fn apply(&self, input: &str) -> String {
        match self {
            Sanitizer::Pattern(s) => s.apply(input),
            Sanitizer::Parameter(s) => s.apply(input),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Sanitizer::Pattern(_) => RuleKind::Pattern,
            Sanitizer::Parameter(_) => RuleKind::Parameter,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Sanitizer::Pattern(s) => s.name(),
            Sanitizer::Parameter(s) => s.name(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Sanitizer::Pattern(s) => s.description(),
            Sanitizer::Parameter(s) => s.description(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        match self {
            Sanitizer::Pattern(s) => s.is_builtin(),
            Sanitizer::Parameter(s) => s.is_builtin(),
        }
    }

    /// The pattern source or the parameter name, depending on the kind.
    pub fn value(&self) -> &str {
        match self {
            Sanitizer::Pattern(s) => s.pattern(),
            Sanitizer::Parameter(s) => s.parameter_name(),
        }
    }

    /// Converts the sanitizer back into its persisted layout.
    pub fn to_record(&self, enabled: bool) -> SanitizerRecord {
        let (pattern, parameter_name) = match self {
            Sanitizer::Pattern(s) => (Some(s.pattern().to_string()), None),
            Sanitizer::Parameter(s) => (None, Some(s.parameter_name().to_string())),
        };
        SanitizerRecord {
            kind: self.kind(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            pattern,
            parameter_name,
            enabled,
        }
    }
}
