use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::matching::lexicon::datamuse;

/// Which lexical resource backs the synonym cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconBackend {
    /// Built-in skill thesaurus, optionally extended from `THESAURUS_PATH`.
    Thesaurus,
    /// Datamuse words API over HTTP.
    Datamuse,
    /// No synonyms: exact-stem and fuzzy matching only.
    None,
}

impl FromStr for LexiconBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thesaurus" => Ok(Self::Thesaurus),
            "datamuse" => Ok(Self::Datamuse),
            "none" => Ok(Self::None),
            other => bail!(
                "Unknown LEXICON_BACKEND '{other}' (expected thesaurus, datamuse, or none)"
            ),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub lexicon_backend: LexiconBackend,
    pub thesaurus_path: Option<PathBuf>,
    pub datamuse_url: String,
    pub synonyms_per_word: u32,
    pub lookup_timeout: Duration,
    pub match_concurrency: usize,
    pub lookup_concurrency: usize,
    pub max_skills_per_list: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            lexicon_backend: parse_env("LEXICON_BACKEND", LexiconBackend::Thesaurus)?,
            thesaurus_path: std::env::var("THESAURUS_PATH").ok().map(PathBuf::from),
            datamuse_url: std::env::var("DATAMUSE_URL")
                .unwrap_or_else(|_| datamuse::DEFAULT_BASE_URL.to_string()),
            synonyms_per_word: parse_env("SYNONYMS_PER_WORD", 10)?,
            lookup_timeout: Duration::from_millis(parse_env("LOOKUP_TIMEOUT_MS", 2000)?),
            match_concurrency: parse_env("MATCH_CONCURRENCY", 8)?,
            lookup_concurrency: parse_env("LOOKUP_CONCURRENCY", 8)?,
            max_skills_per_list: parse_env("MAX_SKILLS_PER_LIST", 500)?,
        })
    }
}

/// Reads `key`, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parses_case_insensitively() {
        assert_eq!("Datamuse".parse::<LexiconBackend>().unwrap(), LexiconBackend::Datamuse);
        assert_eq!(" none ".parse::<LexiconBackend>().unwrap(), LexiconBackend::None);
        assert_eq!("thesaurus".parse::<LexiconBackend>().unwrap(), LexiconBackend::Thesaurus);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = "wordnet".parse::<LexiconBackend>().unwrap_err();
        assert!(err.to_string().contains("wordnet"));
    }

    #[test]
    fn test_parse_value_numbers() {
        assert_eq!(parse_value::<u16>("PORT", "9090").unwrap(), 9090);
        assert_eq!(parse_value::<usize>("MATCH_CONCURRENCY", " 4 ").unwrap(), 4);
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(format!("{err:#}").contains("PORT"));
    }

    #[test]
    fn test_parse_env_default_when_unset() {
        let value: u64 = parse_env("SKILLMATCH_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
