// File: leon-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot cleaning without managing a registry.

use anyhow::Result;

use crate::config::RuleSet;
use crate::registry::SanitizerRegistry;

/// Cleans `content` with the built-in rules and returns the cleaned text.
///
/// # Arguments
///
/// * `content` - Free text that may contain URLs.
/// * `decode_url` - Percent-decode each cleaned URL once.
pub fn headless_clean_string(content: &str, decode_url: bool) -> Result<String> {
    let registry = SanitizerRegistry::with_defaults()?;
    Ok(registry.clean(content, decode_url).cleaned_text)
}

/// Like [`headless_clean_string`], with `user_rules` applied after the built-ins.
pub fn headless_clean_with_rules(content: &str, decode_url: bool, user_rules: &RuleSet) -> Result<String> {
    let registry = SanitizerRegistry::with_user_rules(user_rules)?;
    Ok(registry.clean(content, decode_url).cleaned_text)
}
