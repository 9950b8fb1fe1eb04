//! Cleaning, word splitting, and stemming of raw skill phrases.
//!
//! Everything here is a pure function of its input.

use std::sync::LazyLock;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

/// Lazy `(...)` spans. Unbalanced parentheses are left for the character filter.
static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("parenthesized pattern is valid"));

/// Anything that is not a word character, whitespace, `/` or `-`.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s/-]").expect("disallowed pattern is valid"));

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Lower-cases, drops parenthesized spans, strips special characters, and trims.
///
/// `"Project Management (PMP Certified)"` → `"project management"`.
pub fn clean_skill(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let without_parens = PARENTHESIZED.replace_all(&lower, "");
    let filtered = DISALLOWED.replace_all(&without_parens, "");
    filtered.trim().to_string()
}

/// Splits cleaned text into word tokens. `/` and `-` separate words here.
pub fn tokenize(cleaned: &str) -> Vec<&str> {
    cleaned
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Reduces a token to its English (Porter family) stem.
pub fn stem(token: &str) -> String {
    STEMMER.stem(token).into_owned()
}

/// Clean → tokenize → stem, preserving token order.
pub fn stems(raw: &str) -> Vec<String> {
    let cleaned = clean_skill(raw);
    tokenize(&cleaned).into_iter().map(stem).collect()
}
