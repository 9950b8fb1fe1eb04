#![allow(dead_code)]

//! Single-flight memoization of lexicon lookups per stem.
//!
//! Each stem maps to one shared flight. The first caller spawns the lookup on its own
//! task and every later caller awaits the same `Shared` handle. The task runs to
//! completion even when every waiter is dropped, so a cancelled request neither loses
//! nor repeats a lookup. The map shard lock is held only to fetch or insert a flight,
//! never across an await.
//!
//! External lookups are gated by a semaphore; the timeout covers the lookup itself,
//! not the wait for a permit.
//!
//! Entries are never evicted. One cache is one matching session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::matching::lexicon::Lexicon;
use crate::models::skill::SynonymSet;

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

type Flight = Shared<BoxFuture<'static, SynonymSet>>;

/// Point-in-time counters, exposed for logs and the stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    /// Resolutions served from an already-resolved entry.
    pub hits: u64,
    /// Resolutions that joined a lookup still in flight.
    pub coalesced: u64,
    /// External lookups actually issued.
    pub lookups: u64,
    /// Lookups that errored, timed out, or crashed and fell back to the bare stem.
    pub failures: u64,
}

/// Everything a spawned lookup needs, shared with the cache that started it.
struct LookupRunner {
    lexicon: Arc<dyn Lexicon>,
    timeout: Duration,
    permits: Semaphore,
    issued: AtomicU64,
    failures: AtomicU64,
}

impl LookupRunner {
    /// One bounded external lookup. Never fails.
    async fn run(&self, token: &str) -> SynonymSet {
        let mut set = SynonymSet::new(token);
        // The semaphore is never closed.
        let _permit = self.permits.acquire().await.ok();
        self.issued.fetch_add(1, Ordering::Relaxed);

        match tokio::time::timeout(self.timeout, self.lexicon.lookup(token)).await {
            Ok(Ok(synonyms)) => {
                for synonym in synonyms {
                    set.insert(normalize_separators(&synonym));
                }
                debug!("Resolved '{}' to {} forms", token, set.len());
            }
            Ok(Err(e)) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                debug!("No synonyms found for '{}': {}", token, e);
            }
            Err(_) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!(
                    "Lexicon lookup for '{}' timed out after {}ms",
                    token,
                    self.timeout.as_millis()
                );
            }
        }

        set
    }
}

pub struct SynonymCache {
    runner: Arc<LookupRunner>,
    entries: DashMap<String, Flight>,
    hits: AtomicU64,
    coalesced: AtomicU64,
}

impl SynonymCache {
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        Self::with_timeout(lexicon, DEFAULT_LOOKUP_TIMEOUT)
    }

    pub fn with_timeout(lexicon: Arc<dyn Lexicon>, lookup_timeout: Duration) -> Self {
        Self::with_limits(lexicon, lookup_timeout, DEFAULT_MAX_CONCURRENT_LOOKUPS)
    }

    /// `max_concurrent_lookups` caps external lookups in flight across all callers.
    pub fn with_limits(
        lexicon: Arc<dyn Lexicon>,
        lookup_timeout: Duration,
        max_concurrent_lookups: usize,
    ) -> Self {
        Self {
            runner: Arc::new(LookupRunner {
                lexicon,
                timeout: lookup_timeout,
                permits: Semaphore::new(max_concurrent_lookups.max(1)),
                issued: AtomicU64::new(0),
                failures: AtomicU64::new(0),
            }),
            entries: DashMap::new(),
            hits: AtomicU64::new(0),
            coalesced: AtomicU64::new(0),
        }
    }

    /// Returns the synonym set for `token`, looking it up at most once per session.
    pub async fn resolve(&self, token: &str) -> SynonymSet {
        if let Some(set) = self.entries.get(token).and_then(|f| f.peek().cloned()) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return set;
        }

        let flight = match self.entries.entry(token.to_string()) {
            Entry::Occupied(entry) => {
                let flight = entry.get().clone();
                let counter = if flight.peek().is_some() {
                    &self.hits
                } else {
                    &self.coalesced
                };
                counter.fetch_add(1, Ordering::Relaxed);
                flight
            }
            Entry::Vacant(entry) => entry.insert(self.start_flight(token)).clone(),
        };

        flight.await
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            lookups: self.runner.issued.load(Ordering::Relaxed),
            failures: self.runner.failures.load(Ordering::Relaxed),
        }
    }

    pub fn lexicon_name(&self) -> &'static str {
        self.runner.lexicon.name()
    }

    /// Spawns the lookup for `token`. A crashing adapter surfaces as a `JoinError`
    /// and resolves to the bare token.
    fn start_flight(&self, token: &str) -> Flight {
        let runner = Arc::clone(&self.runner);
        let word = token.to_string();
        let handle = tokio::spawn({
            let runner = Arc::clone(&runner);
            let word = word.clone();
            async move { runner.run(&word).await }
        });

        async move {
            match handle.await {
                Ok(set) => set,
                Err(join_err) => {
                    runner.failures.fetch_add(1, Ordering::Relaxed);
                    warn!("Lexicon task for '{}' crashed: {}", word, join_err);
                    SynonymSet::new(word)
                }
            }
        }
        .boxed()
        .shared()
    }
}

/// `"project_management"` → `"project management"`; collapses whitespace runs.
fn normalize_separators(synonym: &str) -> String {
    synonym
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
