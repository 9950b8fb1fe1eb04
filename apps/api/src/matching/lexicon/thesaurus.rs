#![allow(dead_code)]

//! In-memory thesaurus built from synonym groups.
//!
//! Single-word members are indexed by their surface form and by their stem, since the
//! synonym cache looks words up after stemming. Members such as `front-end` or
//! `cloud computing` are split by the tokenizer before any lookup, so they are never
//! keys; they appear only as synonyms of the other members. Extra groups can be loaded from a JSON
//! file shaped like `[["kubernetes", "k8s"], ["postgresql", "postgres"]]`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use super::{Lexicon, LexiconError};
use crate::matching::tokenizer::{stem, tokenize};

/// Built-in groups of interchangeable skill vocabulary.
pub const SKILL_SYNONYM_GROUPS: &[&[&str]] = &[
    // Languages and runtimes
    &["javascript", "ecmascript"],
    &["golang", "go-lang"],
    &["csharp", "c-sharp"],
    // Infrastructure
    &["kubernetes", "k8s"],
    &["postgresql", "postgres"],
    &["database", "datastore", "dbms"],
    &["containerization", "containerisation"],
    &["cloud", "cloud computing"],
    // Roles
    &["developer", "programmer", "engineer", "coder"],
    &["frontend", "front-end", "client-side"],
    &["backend", "back-end", "server-side"],
    &["fullstack", "full-stack", "full stack"],
    // Practices
    &["testing", "verification", "quality assurance"],
    &["agile", "scrum", "kanban"],
    &["debugging", "troubleshooting"],
    &["deployment", "release", "rollout"],
    &["analytics", "analysis"],
    // Professional skills
    &["management", "administration", "leadership"],
    &["communication", "interpersonal"],
    &["collaboration", "teamwork", "cooperation"],
    &["mentoring", "coaching"],
];

/// Word → synonyms table. Lookups miss with `LexiconError::NotFound`.
#[derive(Debug, Clone, Default)]
pub struct ThesaurusLexicon {
    entries: HashMap<String, Vec<String>>,
}

impl ThesaurusLexicon {
    /// A thesaurus that knows no words; every lookup falls back to the bare stem.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in skill vocabulary.
    pub fn builtin() -> Self {
        let mut thesaurus = Self::empty();
        for group in SKILL_SYNONYM_GROUPS {
            thesaurus.add_group(group.iter().copied());
        }
        thesaurus
    }

    /// Loads the built-in vocabulary plus the groups found in `path`.
    pub fn builtin_with_file(path: &Path) -> Result<Self> {
        let mut thesaurus = Self::builtin();
        let added = thesaurus.merge_file(path)?;
        info!("Loaded {added} synonym groups from {}", path.display());
        Ok(thesaurus)
    }

    /// Merges the synonym groups in a JSON file, returning how many were added.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read thesaurus file '{}'", path.display()))?;
        let groups: Vec<Vec<String>> = serde_json::from_str(&raw)
            .with_context(|| format!("Thesaurus file '{}' is not a list of groups", path.display()))?;

        let count = groups.len();
        for group in &groups {
            self.add_group(group.iter().map(String::as_str));
        }
        Ok(count)
    }

    /// Makes every member of `group` a synonym of every other member.
    pub fn add_group<'a>(&mut self, group: impl IntoIterator<Item = &'a str>) {
        let members: Vec<String> = group
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        for member in members.iter().filter(|m| is_single_token(m)) {
            let others = members.iter().filter(|other| *other != member);
            let mut keys = vec![member.clone()];
            let stemmed = stem(member);
            if stemmed != *member {
                keys.push(stemmed);
            }

            for key in keys {
                let synonyms = self.entries.entry(key).or_default();
                for other in others.clone() {
                    if !synonyms.contains(other) {
                        synonyms.push(other.clone());
                    }
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// True when the tokenizer would hand `member` to a lookup unchanged.
fn is_single_token(member: &str) -> bool {
    tokenize(member) == [member]
}

#[async_trait]
impl Lexicon for ThesaurusLexicon {
    async fn lookup(&self, word: &str) -> Result<Vec<String>, LexiconError> {
        self.entries
            .get(word)
            .cloned()
            .ok_or_else(|| LexiconError::NotFound(word.to_string()))
    }

    fn name(&self) -> &'static str {
        "thesaurus"
    }
}
