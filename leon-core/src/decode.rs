//! Single-pass percent decoding of cleaned URLs.

use log::debug;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Decodes `%XX` escapes exactly once.
///
/// `%2520` becomes `%20`, not a space. Malformed escapes (`%G1`, a trailing
/// `%`) are copied through as-is. `+` is left alone. If the decoded bytes are
/// not valid UTF-8 the input is returned undecoded.
pub fn percent_decode_once(input: &str) -> Cow<'_, str> {
    match percent_decode_str(input).decode_utf8() {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("Keeping URL undecoded, escapes do not form valid UTF-8: {}", e);
            Cow::Borrowed(input)
        }
    }
}
