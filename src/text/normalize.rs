//! Text normalization — punctuation spacing fixes and spoken directive
//! resolution.
//!
//! [`normalize`] is the public entry point: it first repairs punctuation
//! spacing ([`fix_spacing`]), then rewrites spoken directive phrases such
//! as « à la ligne » or « tabulation » into literal control characters
//! ([`apply_directives`]).  Both passes are pure and the composition is
//! idempotent: `normalize(normalize(s)) == normalize(s)`.
//!
//! Every rule lives in a static table so each one can be unit-tested on
//! its own.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Spacing rules
// ---------------------------------------------------------------------------

/// Misplaced-space fixes around punctuation, applied as literal
/// replacements in order.
const SPACE_BEFORE_PUNCT: &[(&str, &str)] = &[
    (" ,", ","),
    (" .", "."),
    (" ;", ";"),
    (" :", ":"),
    (" !", "!"),
    (" ?", "?"),
    (" )", ")"),
    ("( ", "("),
];

/// Punctuation that must be followed by a space when not already followed
/// by whitespace (including at end of string, so a sentence-final period
/// still yields a trailing space for the next chunk to observe).
const SPACE_AFTER_PUNCT: &[char] = &[',', ';', ':', '!', '?', '.', '…'];

/// No space after an apostrophe: `"l' heure"` → `"l'heure"`.
static APOSTROPHE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'\s+([a-zà-öø-ÿ])").expect("valid apostrophe rule"));

/// Collapse runs of two or more spaces to a single space.
static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid multi-space rule"));

/// Fix punctuation spacing: no space before `, . ; : ! ? )`, a space after
/// `, ; : ! ?` and sentence terminators, no space after an apostrophe,
/// single spaces only.
pub fn fix_spacing(raw: &str) -> String {
    let mut s = raw.to_string();
    for (from, to) in SPACE_BEFORE_PUNCT {
        s = s.replace(from, to);
    }
    s = insert_space_after_punct(&s);
    s = APOSTROPHE_SPACE.replace_all(&s, "'$1").into_owned();
    MULTI_SPACE.replace_all(&s, " ").into_owned()
}

/// Insert a space after each [`SPACE_AFTER_PUNCT`] character that is not
/// already followed by whitespace.
///
/// A character-walk rather than a regex because the insertion must also
/// fire at end of string and between adjacent punctuation characters,
/// which a non-overlapping `replace_all` would miss.
fn insert_space_after_punct(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        out.push(ch);
        if SPACE_AFTER_PUNCT.contains(&ch) {
            match chars.peek() {
                Some(next) if next.is_whitespace() => {}
                _ => out.push(' '),
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Spoken directives
// ---------------------------------------------------------------------------

/// Spoken directive phrases rewritten into literal control characters.
///
/// Word-boundary matched and case-insensitive so « Nouvelle Ligne » inside
/// a longer utterance resolves but « tabulations » does not.  Order
/// matters: the optional-suffix « retour (à la ligne) » pattern must run
/// before anything that could consume its words.
static DIRECTIVES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\b(?:a|à)\s+la\s+ligne\b", "\n"),
        (r"(?i)\bretour(?:\s+à\s+la\s+ligne)?\b", "\n"),
        (r"(?i)\bnouvelle?\s+ligne\b", "\n"),
        (r"(?i)\bnouveau\s+paragraphe\b", "\n\n"),
        (r"(?i)\btabulation\b", "\t"),
        (r"(?i)\bligne\s+suivante\b", "\n"),
        (r"(?i)\bsaut\s+de\s+ligne\b", "\n"),
        (r"(?i)\bretour\s+ligne\b", "\n"),
    ]
    .into_iter()
    .map(|(pat, rep)| (Regex::new(pat).expect("valid directive pattern"), rep))
    .collect()
});

/// Rewrite every spoken directive phrase into its control character.
pub fn apply_directives(s: &str) -> String {
    let mut out = s.to_string();
    for (pat, rep) in DIRECTIVES.iter() {
        out = pat.replace_all(&out, *rep).into_owned();
    }
    out
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

/// Full normalization pass: spacing fixes, then directive resolution.
pub fn normalize(raw: &str) -> String {
    apply_directives(&fix_spacing(raw))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
