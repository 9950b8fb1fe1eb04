//! Lexical resource adapters. The matcher reaches a synonym source only through here.
//!
//! Adapters report failures through `LexiconError`; the synonym cache turns every
//! error into the "no synonyms" fallback, so nothing here ever reaches a match caller.

use async_trait::async_trait;
use thiserror::Error;

pub mod datamuse;
pub mod thesaurus;

pub use datamuse::DatamuseLexicon;
pub use thesaurus::ThesaurusLexicon;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No entry for '{0}'")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A lexical knowledge base: word in, synonyms out.
///
/// Carried as `Arc<dyn Lexicon>` by the synonym cache.
#[async_trait]
pub trait Lexicon: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<Vec<String>, LexiconError>;

    /// Short label for logs and stats.
    fn name(&self) -> &'static str;
}

/// Knows no words. Every lookup misses, so matching falls back to stems and fuzzy
/// comparison alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLexicon;

#[async_trait]
impl Lexicon for NoLexicon {
    async fn lookup(&self, word: &str) -> Result<Vec<String>, LexiconError> {
        Err(LexiconError::NotFound(word.to_string()))
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
