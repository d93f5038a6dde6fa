//! Regex-driven sanitizer: every match is deleted.

use regex::Regex;

use crate::errors::InvalidRuleError;
use crate::sanitizers::compiler::compile_pattern;

#[derive(Debug, Clone)]
pub struct PatternSanitizer {
    regex: Regex,
    name: String,
    description: String,
    is_builtin: bool,
}

impl PatternSanitizer {
    /// Compiles `pattern`; an invalid or oversized pattern is rejected here and
    /// never reaches [`PatternSanitizer::apply`].
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        pattern: &str,
        is_builtin: bool,
    ) -> Result<Self, InvalidRuleError> {
        let name = name.into();
        let regex = compile_pattern(&name, pattern)?;
        Ok(Self {
            regex,
            name,
            description: description.into(),
            is_builtin,
        })
    }

    /// Removes all non-overlapping matches, left to right, in one pass.
    /// Text produced by a removal is not scanned again.
    pub fn apply(&self, input: &str) -> String {
        self.regex.replace_all(input, "").into_owned()
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_builtin(&self) -> bool {
        self.is_builtin
    }
}
