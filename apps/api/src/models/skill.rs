#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// A stem plus its known alternatives, in first-seen order.
/// The first element is always the stem itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SynonymSet(Vec<String>);

impl SynonymSet {
    /// Creates a set holding only `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self(vec![token.into()])
    }

    /// Appends `word` unless it is empty or already present.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();
        if word.is_empty() || self.0.contains(&word) {
            return false;
        }
        self.0.push(word);
        true
    }

    /// The stem this set was built for.
    pub fn token(&self) -> &str {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `a|b|c` rendering used in the canonical form of a skill.
    pub fn joined(&self) -> String {
        self.0.join("|")
    }
}

/// One `SynonymSet` per token of a raw skill phrase, in phrase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedSkill {
    tokens: Vec<SynonymSet>,
    /// Sets joined by `|`, tokens joined by a single space.
    canonical: String,
}

impl NormalizedSkill {
    pub fn new(tokens: Vec<SynonymSet>) -> Self {
        let canonical = tokens
            .iter()
            .map(SynonymSet::joined)
            .collect::<Vec<_>>()
            .join(" ");
        Self { tokens, canonical }
    }

    pub fn tokens(&self) -> &[SynonymSet] {
        &self.tokens
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Result of comparing a résumé skill list against a job skill list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub match_count: usize,
    pub total_job_skills: usize,
    pub percentage: u32, // 0 – 100
}

impl MatchResult {
    /// Builds a result, deriving `percentage` as
    /// `min(round(match_count / total_job_skills * 100), 100)`, or 0 for an empty job list.
    pub fn new(match_count: usize, total_job_skills: usize) -> Self {
        let percentage = if total_job_skills > 0 {
            let ratio = match_count as f64 / total_job_skills as f64;
            ((ratio * 100.0).round() as u32).min(100)
        } else {
            0
        };

        Self {
            match_count,
            total_job_skills,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_set_starts_with_token() {
        let set = SynonymSet::new("manag");
        assert_eq!(set.token(), "manag");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_synonym_set_insert_dedupes_and_skips_empty() {
        let mut set = SynonymSet::new("kubernet");
        assert!(set.insert("k8s"));
        assert!(!set.insert("k8s"));
        assert!(!set.insert("kubernet"));
        assert!(!set.insert(""));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["kubernet", "k8s"]);
    }

    #[test]
    fn test_canonical_form_joins_sets_and_tokens() {
        let mut first = SynonymSet::new("project");
        first.insert("task");
        let skill = NormalizedSkill::new(vec![first, SynonymSet::new("manag")]);
        assert_eq!(skill.canonical(), "project|task manag");
    }

    #[test]
    fn test_empty_skill_has_empty_canonical_form() {
        let skill = NormalizedSkill::new(vec![]);
        assert!(skill.is_empty());
        assert_eq!(skill.canonical(), "");
    }

    #[test]
    fn test_percentage_zero_for_empty_job_list() {
        let result = MatchResult::new(3, 0);
        assert_eq!(result.percentage, 0);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 1/8 = 12.5% → 13
        assert_eq!(MatchResult::new(1, 8).percentage, 13);
        // 2/3 = 66.67% → 67
        assert_eq!(MatchResult::new(2, 3).percentage, 67);
    }

    #[test]
    fn test_percentage_capped_at_100() {
        let result = MatchResult::new(5, 2);
        assert_eq!(result.match_count, 5);
        assert_eq!(result.percentage, 100);
    }

    #[test]
    fn test_match_result_serializes_camel_case() {
        let json = serde_json::to_value(MatchResult::new(1, 2)).unwrap();
        assert_eq!(json["matchCount"], 1);
        assert_eq!(json["totalJobSkills"], 2);
        assert_eq!(json["percentage"], 50);
    }
}
