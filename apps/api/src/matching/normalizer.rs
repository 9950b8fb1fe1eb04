use std::sync::Arc;

use futures::future::join_all;

use crate::matching::synonym_cache::SynonymCache;
use crate::matching::tokenizer;
use crate::models::skill::NormalizedSkill;

/// Turns a raw skill phrase into one synonym set per stemmed token.
#[derive(Clone)]
pub struct SkillNormalizer {
    cache: Arc<SynonymCache>,
}

impl SkillNormalizer {
    pub fn new(cache: Arc<SynonymCache>) -> Self {
        Self { cache }
    }

    /// Tokens of one phrase resolve concurrently; output keeps phrase order.
    pub async fn normalize(&self, raw: &str) -> NormalizedSkill {
        let stems = tokenizer::stems(raw);
        let sets = join_all(stems.iter().map(|stem| self.cache.resolve(stem))).await;
        NormalizedSkill::new(sets)
    }
}
