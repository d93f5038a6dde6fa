//! Query parameter sanitizer.
//!
//! The query is located loosely: it starts after the first `?` that precedes any
//! `#` and runs until the `#` or the end of the string. Everything outside the
//! query is copied through untouched.

use crate::errors::InvalidRuleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSanitizer {
    parameter_name: String,
    name: String,
    description: String,
    is_builtin: bool,
}

impl ParameterSanitizer {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameter_name: impl Into<String>,
        is_builtin: bool,
    ) -> Result<Self, InvalidRuleError> {
        let name = name.into();
        let parameter_name = parameter_name.into();
        if parameter_name.is_empty() {
            return Err(InvalidRuleError::EmptyParameterName(name));
        }
        Ok(Self {
            parameter_name,
            name,
            description: description.into(),
            is_builtin,
        })
    }

    /// Removes every `key[=value]` pair whose key equals the parameter name.
    ///
    /// When a pair is removed, empty `&&` segments go with it, and a query left
    /// with no pairs loses its `?`. Input without a matching pair is returned
    /// unchanged.
    pub fn apply(&self, input: &str) -> String {
        let fragment_start = input.find('#').unwrap_or(input.len());
        let Some(query_mark) = input[..fragment_start].find('?') else {
            return input.to_string();
        };
        let query = &input[query_mark + 1..fragment_start];

        let mut removed = false;
        let kept: Vec<&str> = query
            .split('&')
            .filter(|pair| {
                let key = pair.split_once('=').map_or(*pair, |(key, _)| key);
                if key == self.parameter_name {
                    removed = true;
                    false
                } else {
                    true
                }
            })
            .collect();

        if !removed {
            return input.to_string();
        }

        let kept: Vec<&str> = kept.into_iter().filter(|pair| !pair.is_empty()).collect();
        let mut out = String::with_capacity(input.len());
        out.push_str(&input[..query_mark]);
        if !kept.is_empty() {
            out.push('?');
            out.push_str(&kept.join("&"));
        }
        out.push_str(&input[fragment_start..]);
        out
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
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
