//! compiler.rs - Turns persisted rule records into compiled sanitizers.
//!
//! All validation of user input happens here, at rule-creation time: regex
//! syntax, pattern length and compiled size, and the presence of the value
//! each rule kind needs. Nothing downstream of a successful compile can fail.
//!
//! License: GPL-3.0-or-later

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::{RuleSet, SanitizerRecord, MAX_PATTERN_LENGTH};
use crate::errors::InvalidRuleError;
use crate::sanitizers::{RuleKind, Sanitizer};

/// Upper bound for the compiled program of a single rule.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Compiles one pattern with the settings every rule shares: case-sensitive,
/// no multi-line mode, `.` does not match `\n`.
pub fn compile_pattern(rule_name: &str, pattern: &str) -> Result<Regex, InvalidRuleError> {
    if pattern.is_empty() {
        return Err(InvalidRuleError::EmptyPattern(rule_name.to_string()));
    }
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(InvalidRuleError::PatternLengthExceeded(
            rule_name.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|source| InvalidRuleError::InvalidPattern {
            name: rule_name.to_string(),
            source,
        })
}

/// Compiles a single record. `is_builtin` marks rules from the embedded set.
pub fn compile_record(record: &SanitizerRecord, is_builtin: bool) -> Result<Sanitizer, InvalidRuleError> {
    if record.name.is_empty() {
        return Err(InvalidRuleError::EmptyName);
    }

    let sanitizer = match record.kind {
        RuleKind::Pattern => {
            let pattern = record
                .pattern
                .as_deref()
                .ok_or_else(|| InvalidRuleError::MissingValue(record.name.clone(), "pattern"))?;
            Sanitizer::pattern(&record.name, &record.description, pattern, is_builtin)?
        }
        RuleKind::Parameter => {
            let parameter_name = record
                .parameter_name
                .as_deref()
                .ok_or_else(|| InvalidRuleError::MissingValue(record.name.clone(), "parameter_name"))?;
            Sanitizer::parameter(&record.name, &record.description, parameter_name, is_builtin)?
        }
    };

    log::debug!(
        target: "leon_core::sanitizer",
        "Rule '{}' compiled successfully.",
        &record.name
    );
    Ok(sanitizer)
}

/// Compiles a whole rule set, keeping each record's `enabled` flag.
///
/// Stops at the first invalid record; [`crate::config::validate_rules`] is the
/// place to collect every problem of a file at once.
pub fn compile_rules(rule_set: &RuleSet, is_builtin: bool) -> Result<Vec<(Sanitizer, bool)>, InvalidRuleError> {
    debug!("Starting compilation of {} rules.", rule_set.rules.len());

    let compiled = rule_set
        .rules
        .iter()
        .map(|record| compile_record(record, is_builtin).map(|s| (s, record.enabled)))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Finished compiling rules. Total compiled: {}.", compiled.len());
    Ok(compiled)
}
