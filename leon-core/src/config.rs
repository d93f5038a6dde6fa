//! Configuration management for `leon-core`.
//!
//! This module defines the persisted layout of sanitizer rules and the rule set
//! container. It handles YAML (and JSON) serialization, loads the embedded
//! built-in rules, and validates user rule files before they reach a registry.
//!
//! License: GPL-3.0-or-later

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::sanitizers::compiler::compile_record;
use crate::sanitizers::RuleKind;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

fn default_enabled() -> bool {
    true
}

/// One persisted sanitizer rule.
///
/// Pattern rules carry `pattern`, parameter rules carry `parameter_name`; the
/// other field is ignored and omitted when writing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SanitizerRecord {
    pub kind: RuleKind,
    /// Unique identifier for the rule within a registry.
    pub name: String,
    /// Human-readable description of what the rule targets.
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl SanitizerRecord {
    pub fn pattern(name: impl Into<String>, description: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Pattern,
            name: name.into(),
            description: description.into(),
            pattern: Some(pattern.into()),
            parameter_name: None,
            enabled: true,
        }
    }

    pub fn parameter(
        name: impl Into<String>,
        description: impl Into<String>,
        parameter_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: RuleKind::Parameter,
            name: name.into(),
            description: description.into(),
            pattern: None,
            parameter_name: Some(parameter_name.into()),
            enabled: true,
        }
    }
}

/// An ordered list of rule records, the unit that gets loaded and saved.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<SanitizerRecord>,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl RuleSet {
    /// Loads rules from a YAML file, or JSON when the extension is `.json`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading user rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let rule_set = Self::parse(&text, is_json(path))
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;

        validate_rules(&rule_set.rules)?;
        info!("Loaded {} rules from file {}.", rule_set.rules.len(), path.display());

        Ok(rule_set)
    }

    /// Writes the rule set in the format implied by the file extension.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_string_for(path)?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write rules file {}", path.display()))?;
        debug!("Wrote {} rules to {}.", self.rules.len(), path.display());
        Ok(())
    }

    /// Serializes the rule set the way [`RuleSet::save_to_file`] would for `path`.
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        if is_json(path) {
            serde_json::to_string_pretty(self).context("Failed to serialize rules as JSON")
        } else {
            serde_yml::to_string(self).context("Failed to serialize rules as YAML")
        }
    }

    /// Parses `text` in the format implied by `path`, then validates it.
    pub fn parse_for(text: &str, path: &Path) -> Result<Self> {
        let rule_set = Self::parse(text, is_json(path))?;
        validate_rules(&rule_set.rules)?;
        Ok(rule_set)
    }

    /// Parses a rule set from text without touching the filesystem.
    pub fn parse(text: &str, json: bool) -> Result<Self> {
        if json {
            serde_json::from_str(text).context("Invalid JSON rule set")
        } else if text.trim().is_empty() {
            Ok(Self::default())
        } else {
            serde_yml::from_str(text).context("Invalid YAML rule set")
        }
    }

    /// Loads the built-in rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let rule_set: RuleSet = serde_yml::from_str(default_yaml)
            .context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", rule_set.rules.len());
        Ok(rule_set)
    }

    pub fn find(&self, name: &str) -> Option<&SanitizerRecord> {
        self.rules.iter().find(|r| r.name == name)
    }
}

/// Validates rule integrity: names present and unique, values compile.
///
/// Every problem in the list is reported, one per line.
pub fn validate_rules(rules: &[SanitizerRecord]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if !rule.name.is_empty() && !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }
        if let Err(e) = compile_record(rule, false) {
            errors.push(e.to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    }
}
