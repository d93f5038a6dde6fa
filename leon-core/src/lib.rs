// leon-core/src/lib.rs
//! # Léon Core Library
//!
//! `leon-core` provides the platform-independent logic of Léon, the URL cleaner.
//! It finds URLs in free text, strips tracking parameters and tracking-related
//! substrings from them with an ordered set of sanitizer rules, optionally
//! percent-decodes the result, and puts the cleaned URLs back into the text.
//!
//! The library is pure: no I/O happens while cleaning, and rule persistence is
//! left to the caller (see [`RuleSet`] for the persisted layout).
//!
//! ## Modules
//!
//! * `config`: The persisted rule layout, the embedded built-in rules, validation.
//! * `sanitizers`: The two sanitizer kinds and the rule compiler.
//! * `registry`: The ordered, toggleable collection of sanitizers.
//! * `extractor`: Finds URL spans in arbitrary text.
//! * `decode`: Single-pass percent decoding.
//! * `cleaner`: The cleaning pipeline and its result type.
//! * `headless`: One-shot helpers that build a registry for you.
//! * `errors`: Rule and registry error types.
//!
//! ## Usage Example
//!
//! ```rust
//! use leon_core::{RuleKind, SanitizerRegistry};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Built-in rules (Webtrekk and Google Analytics/UTM).
//!     let mut registry = SanitizerRegistry::with_defaults()?;
//!
//!     // 2. A user rule on top.
//!     registry.add_user_sanitizer(RuleKind::Parameter, "fbclid", "Facebook click id", "fbclid")?;
//!
//!     // 3. Clean some text.
//!     let result = registry.clean("see http://a.test/?wt_mc=1&fbclid=x and http://b.test/?c=2", false);
//!     assert_eq!(result.cleaned_text, "see http://a.test/ and http://b.test/?c=2");
//!     assert_eq!(result.urls, vec!["http://a.test/", "http://b.test/?c=2"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Cleaning never fails. Rules are validated when they are created:
//! [`InvalidRuleError`] for bad patterns or parameter names, [`RegistryError`]
//! for removing or toggling something that is missing or built in. File and
//! configuration loading return `anyhow::Result`.
//!
//! ---
//! License: GPL-3.0-or-later

pub mod cleaner;
pub mod config;
pub mod decode;
pub mod errors;
pub mod extractor;
pub mod headless;
pub mod registry;
pub mod sanitizers;

/// Re-exports the persisted rule layout and its helpers.
pub use config::{validate_rules, RuleSet, SanitizerRecord, MAX_PATTERN_LENGTH};

/// Re-exports the error types.
pub use errors::{InvalidRuleError, RegistryError};

/// Re-exports the sanitizer kinds.
pub use sanitizers::{ParameterSanitizer, PatternSanitizer, RuleKind, Sanitizer};

pub use sanitizers::compiler::{compile_record, compile_rules};

pub use registry::{RegistryEntry, SanitizerRegistry};

/// Re-exports the pipeline entry points and result types.
pub use cleaner::{clean, sanitize_url, CleaningResult, UrlMatch};
pub use decode::percent_decode_once;
pub use extractor::{extract_urls, UrlSpan};

pub use headless::{headless_clean_string, headless_clean_with_rules};
