use std::sync::Arc;

use crate::config::Config;
use crate::matching::skill_matcher::SkillMatcher;
use crate::matching::synonym_cache::SynonymCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Session cache for the lifetime of the service; shared by every request.
    pub cache: Arc<SynonymCache>,
    pub matcher: SkillMatcher,
}

impl AppState {
    pub fn new(config: Config, cache: Arc<SynonymCache>) -> Self {
        let matcher = SkillMatcher::new(Arc::clone(&cache), config.match_concurrency);
        Self {
            config,
            cache,
            matcher,
        }
    }
}
