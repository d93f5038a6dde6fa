//! URL extraction from free text.
//!
//! A URL starts with `http://` or `https://` (any case) at a word boundary and
//! runs greedily until whitespace, `<`, `>` or `"`. The greedy match is then
//! trimmed from the right:
//!
//! * sentence punctuation `. , ; : ! ? '` is dropped,
//! * a `)` or `]` is dropped only when the candidate has no opener left for it.
//!
//! A scheme glued to a preceding letter, digit or underscore (`seehttp://x`) is
//! not a URL. Spans never overlap and come back in text order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::ops::Range;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\b(?i:https?)://[^\s<>"]+"#).unwrap());

/// Byte range of one URL inside the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UrlSpan {
    pub start: usize,
    pub end: usize,
}

impl UrlSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn as_str<'t>(&self, text: &'t str) -> &'t str {
        &text[self.range()]
    }
}

/// Returns every URL-shaped span of `text`, in order.
pub fn extract_urls(text: &str) -> Vec<UrlSpan> {
    URL_RE
        .find_iter(text)
        .filter_map(|m| {
            let candidate = trim_trailing_punctuation(m.as_str());
            let authority_start = candidate.find("://")? + 3;
            (candidate.len() > authority_start).then(|| UrlSpan {
                start: m.start(),
                end: m.start() + candidate.len(),
            })
        })
        .collect()
}

pub(crate) fn trim_trailing_punctuation(candidate: &str) -> &str {
    let count = |c: char| candidate.chars().filter(|&x| x == c).count();
    let (open_paren, open_bracket) = (count('('), count('['));
    let (mut close_paren, mut close_bracket) = (count(')'), count(']'));

    let mut end = candidate.len();
    while let Some(last) = candidate[..end].chars().next_back() {
        let strip = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' => true,
            ')' => close_paren > open_paren,
            ']' => close_bracket > open_bracket,
            _ => false,
        };
        if !strip {
            break;
        }
        match last {
            ')' => close_paren -= 1,
            ']' => close_bracket -= 1,
            _ => {}
        }
        end -= last.len_utf8();
    }
    &candidate[..end]
}
