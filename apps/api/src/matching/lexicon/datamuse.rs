//! Network lexicon backed by the Datamuse words API (`/words?rel_syn=...`).
//!
//! Retries on 429 and 5xx with exponential backoff; any other non-success status
//! is returned as `LexiconError::Api` for the cache to swallow.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Lexicon, LexiconError};

pub const DEFAULT_BASE_URL: &str = "https://api.datamuse.com";
const MAX_RETRIES: u32 = 3;
const BACKOFF_BASE_MS: u64 = 200;
const MIN_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(100);

/// One entry of a Datamuse response; the relevance `score` is ignored.
#[derive(Debug, Deserialize)]
struct DatamuseWord {
    word: String,
}

#[derive(Clone)]
pub struct DatamuseLexicon {
    client: Client,
    base_url: String,
    max_results: u32,
}

/// Per-request timeout such that every attempt plus the backoff between them fits
/// inside `budget`, floored at `MIN_ATTEMPT_TIMEOUT`.
pub fn attempt_timeout(budget: Duration) -> Duration {
    let backoff: u64 = (1..MAX_RETRIES).map(|n| BACKOFF_BASE_MS << (n - 1)).sum();
    let remaining = budget.saturating_sub(Duration::from_millis(backoff));
    (remaining / MAX_RETRIES).max(MIN_ATTEMPT_TIMEOUT)
}

impl DatamuseLexicon {
    /// `timeout` bounds each HTTP attempt, not the whole retried lookup.
    pub fn new(
        base_url: impl Into<String>,
        max_results: u32,
        timeout: Duration,
    ) -> Result<Self, LexiconError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_results,
        })
    }

    fn words_url(&self) -> String {
        format!("{}/words", self.base_url)
    }
}

/// Extracts synonym strings from a Datamuse response body.
fn parse_words(body: &str) -> Result<Vec<String>, LexiconError> {
    let words: Vec<DatamuseWord> = serde_json::from_str(body)?;
    Ok(words.into_iter().map(|w| w.word).collect())
}

#[async_trait]
impl Lexicon for DatamuseLexicon {
    async fn lookup(&self, word: &str) -> Result<Vec<String>, LexiconError> {
        let max = self.max_results.to_string();
        let mut last_error: Option<LexiconError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(BACKOFF_BASE_MS * (1 << (attempt - 1)));
                warn!(
                    "Datamuse lookup for '{}' failed (attempt {}), retrying after {}ms...",
                    word,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .get(self.words_url())
                .query(&[("rel_syn", word), ("max", max.as_str())])
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LexiconError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(LexiconError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LexiconError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let body = response.text().await?;
            let synonyms = parse_words(&body)?;
            debug!("Datamuse returned {} synonyms for '{}'", synonyms.len(), word);

            if synonyms.is_empty() {
                return Err(LexiconError::NotFound(word.to_string()));
            }
            return Ok(synonyms);
        }

        Err(last_error.unwrap_or_else(|| LexiconError::NotFound(word.to_string())))
    }

    fn name(&self) -> &'static str {
        "datamuse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_words_extracts_words_in_order() {
        let body = r#"[{"word":"direction","score":1234},{"word":"supervision","score":987}]"#;
        assert_eq!(
            parse_words(body).unwrap(),
            vec!["direction".to_string(), "supervision".to_string()]
        );
    }

    #[test]
    fn test_parse_words_tolerates_missing_score() {
        let body = r#"[{"word":"coder"}]"#;
        assert_eq!(parse_words(body).unwrap(), vec!["coder".to_string()]);
    }

    #[test]
    fn test_parse_words_empty_array() {
        assert!(parse_words("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_words_rejects_garbage() {
        assert!(matches!(
            parse_words("<html>oops</html>"),
            Err(LexiconError::Parse(_))
        ));
    }

    #[test]
    fn test_words_url_strips_trailing_slash() {
        let lexicon =
            DatamuseLexicon::new("https://api.datamuse.com/", 10, Duration::from_secs(1)).unwrap();
        assert_eq!(lexicon.words_url(), "https://api.datamuse.com/words");
        assert_eq!(lexicon.name(), "datamuse");
    }

    #[test]
    fn test_attempt_timeout_fits_retries_in_budget() {
        let budget = Duration::from_secs(2);
        let per_attempt = attempt_timeout(budget);
        let backoff = Duration::from_millis(BACKOFF_BASE_MS + 2 * BACKOFF_BASE_MS);

        assert!(per_attempt < budget);
        assert!(per_attempt * MAX_RETRIES + backoff <= budget);
    }

    #[test]
    fn test_attempt_timeout_has_floor() {
        assert_eq!(attempt_timeout(Duration::from_millis(300)), MIN_ATTEMPT_TIMEOUT);
        assert_eq!(attempt_timeout(Duration::ZERO), MIN_ATTEMPT_TIMEOUT);
    }

    #[tokio::test]
    async fn test_unreachable_host_returns_error() {
        // Port 9 on localhost: connection refused, never a panic.
        let lexicon =
            DatamuseLexicon::new("http://127.0.0.1:9", 5, Duration::from_millis(200)).unwrap();
        assert!(lexicon.lookup("manage").await.is_err());
    }
}
