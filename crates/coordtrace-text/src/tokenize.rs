use unicode_segmentation::UnicodeSegmentation;

use crate::normalize::normalize;

/// Produce a canonical, sorted, deduplicated, whitespace-joined token
/// sequence from a raw message (§4.2).
///
/// Tokenization runs the normalizer first, then splits on Unicode
/// word-break boundaries: a run of non-letter characters is a separator,
/// even when that run ends in an apostrophe (so a trailing possessive
/// apostrophe does not get glued onto the next word). Empty tokens are
/// dropped. The result is deterministic: identical inputs always yield
/// identical token sets, and re-tokenizing an already-canonical token
/// string reproduces it exactly (a fixed point).
pub fn tokenize(text: &str) -> String {
    let normalized = normalize(text);

    let mut tokens: Vec<&str> = normalized
        .unicode_words()
        .map(trim_trailing_apostrophe)
        .filter(|t| !t.is_empty())
        .collect();

    tokens.sort_unstable();
    tokens.dedup();
    tokens.join(" ")
}

/// `unicode_words()` keeps an internal apostrophe (e.g. `don't`) as part of
/// the word; a trailing one (e.g. from a possessive `bob's` reduced to
/// `bob'`) is still separator material per §4.2 and is trimmed here.
fn trim_trailing_apostrophe(word: &str) -> &str {
    word.trim_end_matches('\'')
}
