//! The ordered collection of sanitizers a clean runs through.
//!
//! Entries live in a `Vec` in application order with a name index beside it.
//! Built-ins come first, are always enabled and cannot be removed; user rules
//! follow in insertion order and can be toggled or removed.

use anyhow::{Context, Result};
use log::debug;
use std::collections::HashMap;

use crate::cleaner::{clean, CleaningResult};
use crate::config::{RuleSet, SanitizerRecord};
use crate::errors::{InvalidRuleError, RegistryError};
use crate::sanitizers::compiler::{compile_record, compile_rules};
use crate::sanitizers::{RuleKind, Sanitizer};

/// One sanitizer together with its on/off switch.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub sanitizer: Sanitizer,
    pub enabled: bool,
}

impl RegistryEntry {
    pub fn is_builtin(&self) -> bool {
        self.sanitizer.is_builtin()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SanitizerRegistry {
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
}

impl SanitizerRegistry {
    /// An empty registry with no built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding only the embedded built-in rules.
    pub fn with_defaults() -> Result<Self> {
        let defaults = RuleSet::load_default_rules()?;
        Self::from_rule_sets(&defaults, None)
    }

    /// Built-ins plus a persisted set of user rules, in that order.
    pub fn with_user_rules(user_rules: &RuleSet) -> Result<Self> {
        let defaults = RuleSet::load_default_rules()?;
        Self::from_rule_sets(&defaults, Some(user_rules))
    }

    /// Builds a registry from an explicit built-in set and optional user set.
    pub fn from_rule_sets(builtins: &RuleSet, user_rules: Option<&RuleSet>) -> Result<Self> {
        let mut registry = Self::new();
        for (sanitizer, _) in compile_rules(builtins, true).context("Failed to compile built-in rules")? {
            registry.push(sanitizer, true)?;
        }
        if let Some(user_rules) = user_rules {
            debug!("Adding {} user rules to the registry.", user_rules.rules.len());
            for record in &user_rules.rules {
                registry
                    .add_user_record(record)
                    .with_context(|| format!("Failed to load user rule '{}'", record.name))?;
            }
        }
        Ok(registry)
    }

    fn push(&mut self, sanitizer: Sanitizer, enabled: bool) -> Result<(), InvalidRuleError> {
        if self.index.contains_key(sanitizer.name()) {
            return Err(InvalidRuleError::DuplicateName(sanitizer.name().to_string()));
        }
        let enabled = enabled || sanitizer.is_builtin();
        self.index.insert(sanitizer.name().to_string(), self.entries.len());
        self.entries.push(RegistryEntry { sanitizer, enabled });
        Ok(())
    }

    /// Validates and appends a user rule. On error the registry is unchanged.
    pub fn add_user_sanitizer(
        &mut self,
        kind: RuleKind,
        name: &str,
        description: &str,
        value: &str,
    ) -> Result<(), InvalidRuleError> {
        let record = match kind {
            RuleKind::Pattern => SanitizerRecord::pattern(name, description, value),
            RuleKind::Parameter => SanitizerRecord::parameter(name, description, value),
        };
        self.add_user_record(&record)
    }

    /// Appends a persisted user record, keeping its `enabled` flag.
    pub fn add_user_record(&mut self, record: &SanitizerRecord) -> Result<(), InvalidRuleError> {
        if self.index.contains_key(&record.name) {
            return Err(InvalidRuleError::DuplicateName(record.name.clone()));
        }
        let sanitizer = compile_record(record, false)?;
        debug!("Registered user sanitizer '{}' ({}).", record.name, record.kind);
        self.push(sanitizer, record.enabled)
    }

    /// Removes a user rule and hands it back.
    pub fn remove_user_sanitizer(&mut self, name: &str) -> Result<Sanitizer, RegistryError> {
        let position = self.position_of_user(name)?;
        let entry = self.entries.remove(position);
        self.reindex();
        debug!("Removed user sanitizer '{}'.", name);
        Ok(entry.sanitizer)
    }

    /// Toggles a user rule. Built-ins cannot be switched.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), RegistryError> {
        let position = self.position_of_user(name)?;
        self.entries[position].enabled = enabled;
        debug!("Sanitizer '{}' enabled = {}.", name, enabled);
        Ok(())
    }

    fn position_of_user(&self, name: &str) -> Result<usize, RegistryError> {
        let position = *self
            .index
            .get(name)
            .ok_or_else(|| RegistryError::UnknownSanitizer(name.to_string()))?;
        if self.entries[position].is_builtin() {
            return Err(RegistryError::BuiltinImmutable(name.to_string()));
        }
        Ok(position)
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.sanitizer.name().to_string(), i))
            .collect();
    }

    /// Every entry in application order.
    pub fn list(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// The sanitizers a clean will run, in order.
    pub fn enabled_sanitizers(&self) -> impl Iterator<Item = &Sanitizer> {
        self.entries.iter().filter(|e| e.enabled).map(|e| &e.sanitizer)
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The user entries in their persisted layout.
    pub fn user_records(&self) -> RuleSet {
        RuleSet {
            rules: self
                .entries
                .iter()
                .filter(|e| !e.is_builtin())
                .map(|e| e.sanitizer.to_record(e.enabled))
                .collect(),
        }
    }

    /// Runs [`clean`] against this registry.
    pub fn clean(&self, text: &str, decode_url: bool) -> CleaningResult {
        clean(text, decode_url, self)
    }
}
