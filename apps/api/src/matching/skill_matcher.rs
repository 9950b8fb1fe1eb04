#![allow(dead_code)]

//! Normalizes both skill lists and counts matching résumé skills.
//!
//! Algorithm:
//! 1. Normalize every résumé and job skill, at most `concurrency` at a time, keeping
//!    input order and length (duplicates included).
//! 2. match_count = résumé entries that match at least one job entry.
//! 3. total_job_skills = job list length.
//! 4. percentage = min(round(match_count / total_job_skills × 100), 100), 0 if no job skills.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::matching::fuzzy::skills_match;
use crate::matching::normalizer::SkillNormalizer;
use crate::matching::synonym_cache::SynonymCache;
use crate::models::skill::{MatchResult, NormalizedSkill};

pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Clone)]
pub struct SkillMatcher {
    normalizer: SkillNormalizer,
    concurrency: usize,
}

impl SkillMatcher {
    pub fn new(cache: Arc<SynonymCache>, concurrency: usize) -> Self {
        Self {
            normalizer: SkillNormalizer::new(cache),
            concurrency: concurrency.max(1),
        }
    }

    pub fn normalizer(&self) -> &SkillNormalizer {
        &self.normalizer
    }

    /// Normalizes a list with bounded fan-out. Output index `i` is input index `i`.
    pub async fn normalize_all<S: AsRef<str>>(&self, skills: &[S]) -> Vec<NormalizedSkill> {
        let owned: Vec<String> = skills.iter().map(|skill| skill.as_ref().to_owned()).collect();
        stream::iter(owned)
            .map(|skill| {
                let normalizer = self.normalizer.clone();
                async move { normalizer.normalize(&skill).await }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    pub async fn calculate_match<R, J>(&self, resume_skills: &[R], job_skills: &[J]) -> MatchResult
    where
        R: AsRef<str>,
        J: AsRef<str>,
    {
        let normalized_resume = self.normalize_all(resume_skills).await;
        let normalized_job = self.normalize_all(job_skills).await;

        let result = score_normalized(&normalized_resume, &normalized_job);
        debug!(
            "Matched {}/{} résumé skills against {} job skills ({}%)",
            result.match_count,
            normalized_resume.len(),
            result.total_job_skills,
            result.percentage
        );
        result
    }
}

/// Steps 2–4 over already-normalized lists.
pub fn score_normalized(resume: &[NormalizedSkill], job: &[NormalizedSkill]) -> MatchResult {
    let match_count = resume
        .iter()
        .filter(|r| job.iter().any(|j| skills_match(r, j)))
        .count();

    MatchResult::new(match_count, job.len())
}
