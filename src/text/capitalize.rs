//! Automatic capitalization driven by the tail state of the previous
//! injection.
//!
//! Two independent rules:
//!
//! 1. **Leading capital** — when the session demands it (first injection,
//!    previous chunk ended a sentence or a line, or the sticky
//!    `force_capital_next` flag is still set), the first alphabetic
//!    character anywhere in the chunk is uppercased, skipping any leading
//!    punctuation or whitespace.
//! 2. **Mid-chunk capitals** — any lowercase letter following a sentence
//!    terminator plus whitespace and optional opening quotes/brackets is
//!    uppercased, so multi-sentence utterances come out right.
//!
//! Rule 1 runs first; rule 2 only matches lowercase letters, so a position
//! already uppercased by rule 1 is never processed twice.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::mirror::FormattingState;

/// Lowercase letter after a sentence terminator, optional French opening
/// quote / parenthesis / bracket in between.
static AFTER_SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([.!?…]\s+[«"(\[]*\s*)(\p{Ll})"#).expect("valid sentence-capital rule")
});

/// Apply both capitalization rules to `text` under the given tail state.
pub fn capitalize(state: &FormattingState, text: &str) -> String {
    let mut s = if state.wants_leading_capital() {
        uppercase_first_alpha(text)
    } else {
        text.to_string()
    };

    s = AFTER_SENTENCE_END
        .replace_all(&s, |caps: &Captures<'_>| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned();

    s
}

/// Uppercase the first alphabetic character in `s`, leaving everything
/// else untouched.  No-op when `s` contains no alphabetic character.
fn uppercase_first_alpha(s: &str) -> String {
    match s.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((i, ch)) => {
            let mut out = String::with_capacity(s.len());
            out.push_str(&s[..i]);
            out.extend(ch.to_uppercase());
            out.push_str(&s[i + ch.len_utf8()..]);
            out
        }
        None => s.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
