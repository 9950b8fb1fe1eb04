// Skill matching core: lexicon adapters, tokenizer/stemmer, single-flight synonym cache,
// normalizer, fuzzy token matcher, and the list matcher that produces a MatchResult.
// Only `handlers` knows about HTTP.

pub mod fuzzy;
pub mod handlers;
pub mod lexicon;
pub mod normalizer;
pub mod skill_matcher;
pub mod synonym_cache;
pub mod tokenizer;
