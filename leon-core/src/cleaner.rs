//! The cleaning pipeline.
//!
//! `extract → sanitize (left fold over enabled rules) → optional decode, then
//! sanitize again → substitute`. Text outside URL spans is copied verbatim.
//! Cleaning cannot fail: no URLs, bad escapes and empty input are all ordinary
//! results.

use log::debug;
use serde::Serialize;

use crate::decode::percent_decode_once;
use crate::extractor::{extract_urls, trim_trailing_punctuation};
use crate::registry::SanitizerRegistry;

/// One extracted URL before and after cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMatch {
    /// Byte offset of the URL in the original text.
    pub start: usize,
    pub end: usize,
    pub original: String,
    /// The cleaned URL as the extractor would find it in `cleaned_text`.
    /// Trailing sentence punctuation left behind by a sanitizer stays in the
    /// text but is not reported here.
    pub cleaned: String,
}

impl UrlMatch {
    pub fn changed(&self) -> bool {
        self.original != self.cleaned
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningResult {
    pub original_text: String,
    pub cleaned_text: String,
    /// Cleaned URLs in order of appearance.
    pub urls: Vec<String>,
    pub matches: Vec<UrlMatch>,
}

impl CleaningResult {
    /// True when at least one URL was altered.
    pub fn changed(&self) -> bool {
        self.matches.iter().any(UrlMatch::changed)
    }
}

fn apply_enabled(url: String, registry: &SanitizerRegistry) -> String {
    registry
        .enabled_sanitizers()
        .fold(url, |acc, sanitizer| sanitizer.apply(&acc))
}

/// Applies the enabled sanitizers of `registry`, in order, to one URL.
///
/// With `decode_url` the result is percent-decoded once and, if decoding
/// changed anything, sanitized a second time so parameters hidden behind
/// escapes (an encoded redirect target) are removed as well.
pub fn sanitize_url(url: &str, decode_url: bool, registry: &SanitizerRegistry) -> String {
    let sanitized = apply_enabled(url.to_string(), registry);
    if !decode_url {
        return sanitized;
    }

    let decoded = percent_decode_once(&sanitized);
    if decoded == sanitized.as_str() {
        return sanitized;
    }
    apply_enabled(decoded.into_owned(), registry)
}

/// Cleans every URL found in `text`.
pub fn clean(text: &str, decode_url: bool, registry: &SanitizerRegistry) -> CleaningResult {
    let spans = extract_urls(text);
    debug!("Found {} URL(s) in {} bytes of input.", spans.len(), text.len());

    let mut cleaned_text = String::with_capacity(text.len());
    let mut matches = Vec::with_capacity(spans.len());
    let mut last_end = 0usize;

    for span in spans {
        let original = span.as_str(text);
        let replacement = sanitize_url(original, decode_url, registry);
        if original != replacement {
            debug!("Cleaned URL at {}..{}: {} -> {}", span.start, span.end, original, replacement);
        }

        cleaned_text.push_str(&text[last_end..span.start]);
        cleaned_text.push_str(&replacement);
        last_end = span.end;

        matches.push(UrlMatch {
            start: span.start,
            end: span.end,
            original: original.to_string(),
            cleaned: trim_trailing_punctuation(&replacement).to_string(),
        });
    }
    cleaned_text.push_str(&text[last_end..]);

    CleaningResult {
        original_text: text.to_string(),
        cleaned_text,
        urls: matches.iter().map(|m| m.cleaned.clone()).collect(),
        matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SanitizerRegistry {
        SanitizerRegistry::with_defaults().unwrap()
    }

    #[test]
    fn text_without_urls_is_returned_verbatim() {
        let registry = registry();
        for text in ["", "   ", "no links here, just ?utm_source=x text", "ftp://x.test/?wt_mc=1"] {
            let result = clean(text, true, &registry);
            assert_eq!(result.cleaned_text, text);
            assert!(result.urls.is_empty());
            assert!(!result.changed());
        }
    }

    #[test]
    fn surrounding_text_is_preserved() {
        let result = clean(
            "see http://a.test/?wt_mc=1 and http://b.test/?c=2 thanks",
            false,
            &registry(),
        );
        assert_eq!(result.urls, vec!["http://a.test/", "http://b.test/?c=2"]);
        assert_eq!(result.cleaned_text, "see http://a.test/ and http://b.test/?c=2 thanks");
        assert!(result.changed());
        assert!(result.matches[0].changed());
        assert!(!result.matches[1].changed());
    }

    #[test]
    fn sanitizers_run_in_registry_order() {
        // A later rule sees the output of an earlier one.
        let mut registry = SanitizerRegistry::new();
        registry
            .add_user_sanitizer(crate::RuleKind::Pattern, "strip-x", "", "x_")
            .unwrap();
        registry
            .add_user_sanitizer(crate::RuleKind::Parameter, "id", "", "id")
            .unwrap();
        let result = clean("http://t.test/?x_id=1&k=2", false, &registry);
        assert_eq!(result.urls, vec!["http://t.test/?k=2"]);
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let mut registry = registry();
        registry
            .add_user_sanitizer(crate::RuleKind::Parameter, "fbclid", "", "fbclid")
            .unwrap();
        registry.set_enabled("fbclid", false).unwrap();
        let result = clean("http://x.test/?fbclid=1", false, &registry);
        assert_eq!(result.urls, vec!["http://x.test/?fbclid=1"]);
    }

    #[test]
    fn decode_runs_after_sanitizing() {
        let result = clean("http://x.test/?q=a%20b&wt_mc=1", true, &registry());
        assert_eq!(result.urls, vec!["http://x.test/?q=a b"]);
    }

    #[test]
    fn encoded_redirect_target_is_sanitized_after_decoding() {
        let text = "go http://x.test/?r=http%3A%2F%2Fy.test%2F%3Futm_source%3Dmail";
        let once = clean(text, true, &registry());
        assert_eq!(once.cleaned_text, "go http://x.test/?r=http://y.test/");

        let twice = clean(&once.cleaned_text, true, &registry());
        assert_eq!(twice.cleaned_text, once.cleaned_text);
        assert_eq!(twice.urls, once.urls);
    }

    #[test]
    fn reported_url_drops_punctuation_exposed_by_a_sanitizer() {
        let result = clean("see http://x.test/a.?wt_mc=1 ok", false, &registry());
        assert_eq!(result.cleaned_text, "see http://x.test/a. ok");
        assert_eq!(result.urls, vec!["http://x.test/a"]);
        assert!(result.matches[0].changed());
    }

    #[test]
    fn match_offsets_point_into_the_original() {
        let text = "x http://x.test/?wt_mc=1 y";
        let result = clean(text, false, &registry());
        let m = &result.matches[0];
        assert_eq!(&text[m.start..m.end], m.original);
    }
}
