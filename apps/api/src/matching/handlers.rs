use axum::{extract::State, Json};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::matching::synonym_cache::CacheStats;
use crate::models::skill::{MatchResult, SynonymSet};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default, deserialize_with = "lenient_skill_list")]
    pub resume_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_skill_list")]
    pub job_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    #[serde(default, deserialize_with = "lenient_skill")]
    pub skill: String,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub skill: String,
    pub tokens: Vec<SynonymSet>,
    pub canonical: String,
}

#[derive(Debug, Serialize)]
pub struct LexiconStatsResponse {
    pub lexicon: &'static str,
    #[serde(flatten)]
    pub cache: CacheStats,
}

/// Non-string entries count as empty skills instead of failing the request.
fn lenient_skill_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values.into_iter().map(value_to_skill).collect())
}

fn lenient_skill<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_skill(Value::deserialize(deserializer)?))
}

fn value_to_skill(value: Value) -> String {
    match value {
        Value::String(s) => s,
        _ => String::new(),
    }
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let limit = state.config.max_skills_per_list;
    if req.resume_skills.len() > limit || req.job_skills.len() > limit {
        return Err(AppError::Validation(format!(
            "Skill lists are limited to {limit} entries each"
        )));
    }

    let result = state
        .matcher
        .calculate_match(&req.resume_skills, &req.job_skills)
        .await;

    info!(
        "Skill match: {}/{} ({}%)",
        result.match_count, result.total_job_skills, result.percentage
    );
    Ok(Json(result))
}

/// POST /api/v1/normalize
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(req): Json<NormalizeRequest>,
) -> Json<NormalizeResponse> {
    let normalized = state.matcher.normalizer().normalize(&req.skill).await;
    Json(NormalizeResponse {
        canonical: normalized.canonical().to_string(),
        tokens: normalized.tokens().to_vec(),
        skill: req.skill,
    })
}

/// GET /api/v1/lexicon/stats
pub async fn handle_lexicon_stats(State(state): State<AppState>) -> Json<LexiconStatsResponse> {
    Json(LexiconStatsResponse {
        lexicon: state.cache.lexicon_name(),
        cache: state.cache.stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_request_camel_case() {
        let req: MatchRequest = serde_json::from_str(
            r#"{"resumeSkills": ["Rust", "Go"], "jobSkills": ["rust"]}"#,
        )
        .unwrap();
        assert_eq!(req.resume_skills, vec!["Rust", "Go"]);
        assert_eq!(req.job_skills, vec!["rust"]);
    }

    #[test]
    fn test_non_string_entries_become_empty_skills() {
        let req: MatchRequest = serde_json::from_str(
            r#"{"resumeSkills": ["Rust", 42, null, {"x": 1}], "jobSkills": [true]}"#,
        )
        .unwrap();
        assert_eq!(req.resume_skills, vec!["Rust", "", "", ""]);
        assert_eq!(req.job_skills, vec![""]);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let req: MatchRequest = serde_json::from_str("{}").unwrap();
        assert!(req.resume_skills.is_empty());
        assert!(req.job_skills.is_empty());
    }

    #[test]
    fn test_list_must_be_an_array() {
        assert!(serde_json::from_str::<MatchRequest>(r#"{"resumeSkills": "Rust"}"#).is_err());
    }

    #[test]
    fn test_normalize_request_non_string_skill() {
        let req: NormalizeRequest = serde_json::from_str(r#"{"skill": 7}"#).unwrap();
        assert_eq!(req.skill, "");
    }
}
