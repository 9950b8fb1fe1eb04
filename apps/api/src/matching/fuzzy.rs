//! Exact or bounded-edit-distance equivalence between synonym sets.
//!
//! Two sets match when any member of one equals, or is within `MAX_EDIT_DISTANCE`
//! single-character insertions/deletions/substitutions of, any member of the other.
//! Two skills match when their canonical forms are equal or when any token of one
//! matches any token of the other (unordered, not positional).

use crate::models::skill::{NormalizedSkill, SynonymSet};

pub const MAX_EDIT_DISTANCE: usize = 2;

/// Classic Levenshtein distance ≤ `max`.
pub fn within_edit_distance(a: &str, b: &str, max: usize) -> bool {
    // Length gap is a lower bound on the distance.
    if a.chars().count().abs_diff(b.chars().count()) > max {
        return false;
    }
    strsim::levenshtein(a, b) <= max
}

/// Symmetric: checks the whole cross product of both sets.
pub fn tokens_match(a: &SynonymSet, b: &SynonymSet) -> bool {
    a.iter().any(|left| {
        b.iter()
            .any(|right| left == right || within_edit_distance(left, right, MAX_EDIT_DISTANCE))
    })
}

pub fn skills_match(resume_skill: &NormalizedSkill, job_skill: &NormalizedSkill) -> bool {
    if resume_skill.canonical() == job_skill.canonical() {
        return true;
    }

    resume_skill
        .tokens()
        .iter()
        .any(|r| job_skill.tokens().iter().any(|j| tokens_match(r, j)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> SynonymSet {
        let mut set = SynonymSet::new(words[0]);
        for w in &words[1..] {
            set.insert(*w);
        }
        set
    }

    fn skill(tokens: &[&[&str]]) -> NormalizedSkill {
        NormalizedSkill::new(tokens.iter().map(|t| set(t)).collect())
    }

    #[test]
    fn test_edit_distance_bounds() {
        assert!(within_edit_distance("java", "java", 2));
        assert!(within_edit_distance("java", "jawa", 2)); // substitution
        assert!(within_edit_distance("react", "reactjs", 2)); // two insertions
        assert!(!within_edit_distance("react", "reactnative", 2));
        assert!(!within_edit_distance("python", "docker", 2));
    }

    #[test]
    fn test_transposition_counts_as_two_edits() {
        // "ab" → "ba" is one transposition but two substitutions.
        assert!(within_edit_distance("ab", "ba", 2));
        assert!(!within_edit_distance("ab", "ba", 1));
    }

    #[test]
    fn test_edit_distance_counts_chars_not_bytes() {
        assert!(within_edit_distance("café", "cafe", 1));
    }

    #[test]
    fn test_tokens_match_exact_member() {
        assert!(tokens_match(&set(&["kubernet", "k8s"]), &set(&["k8s"])));
    }

    #[test]
    fn test_tokens_match_checks_full_cross_product() {
        // Only the last members of each set are close.
        let a = set(&["alpha", "beta", "terraform"]);
        let b = set(&["zulu", "yankee", "terraforms"]);
        assert!(tokens_match(&a, &b));
    }

    #[test]
    fn test_tokens_match_rejects_distant_sets() {
        assert!(!tokens_match(&set(&["kubernet", "k8s"]), &set(&["docker"])));
    }

    #[test]
    fn test_tokens_match_is_symmetric() {
        let pairs = [
            (set(&["java"]), set(&["jawa"])),
            (set(&["kubernet", "k8s"]), set(&["docker"])),
            (set(&["manag", "direction"]), set(&["direct"])),
            (set(&["go"]), set(&["rust"])),
        ];
        for (a, b) in &pairs {
            assert_eq!(tokens_match(a, b), tokens_match(b, a));
        }
    }

    #[test]
    fn test_skills_match_on_canonical_equality() {
        let a = skill(&[&["project"], &["manag"]]);
        let b = skill(&[&["project"], &["manag"]]);
        assert!(skills_match(&a, &b));
    }

    #[test]
    fn test_skills_match_is_unordered_bag_of_tokens() {
        let resume = skill(&[&["distribut"], &["system"]]);
        let job = skill(&[&["backend"], &["system"], &["design"]]);
        assert!(skills_match(&resume, &job));
    }

    #[test]
    fn test_skills_match_any_single_token_suffices() {
        // Literal any-token-pair semantics: one shared word is enough.
        let resume = skill(&[&["data"], &["scienc"]]);
        let job = skill(&[&["data"], &["entri"]]);
        assert!(skills_match(&resume, &job));
    }

    #[test]
    fn test_skills_no_match() {
        let resume = skill(&[&["kubernet"]]);
        let job = skill(&[&["docker"]]);
        assert!(!skills_match(&resume, &job));
    }

    #[test]
    fn test_two_empty_skills_match_by_canonical_form() {
        let empty = NormalizedSkill::new(vec![]);
        assert!(skills_match(&empty, &empty.clone()));
        assert!(!skills_match(&empty, &skill(&[&["rust"]])));
    }
}
