//! Weighted keyword extraction from natural-language questions
//!
//! The generator is asked for `term:weight` lines and its response is parsed
//! defensively: a line is split on the first colon only, the term lowercased
//! and trimmed, the weight parsed as a number; the pair survives only if the
//! term is longer than one character and the weight lies in `[1, 10]`.
//! Malformed lines are skipped. If nothing survives (or the generator fails
//! outright), the question itself is tokenized as a deterministic fallback.

use crate::llm::TextGenerator;
use crate::models::WeightedKeyword;
use crate::query::prompt::keyword_prompt;

/// Maximum keyword weight; also the weight assigned to fallback tokens
pub const MAX_WEIGHT: f64 = 10.0;

/// Minimum keyword weight accepted from the generator
pub const MIN_WEIGHT: f64 = 1.0;

/// Extract weighted keywords for a question, with local fallback
pub async fn extract<G: TextGenerator>(generator: &G, question: &str) -> Vec<WeightedKeyword> {
    let keywords = match generator.generate(&keyword_prompt(question)).await {
        Ok(response) => parse_response(&response),
        Err(e) => {
            tracing::warn!(error = %e, "Keyword generation failed, using fallback tokens");
            Vec::new()
        }
    };

    let mut keywords = if keywords.is_empty() {
        fallback_keywords(question)
    } else {
        keywords
    };

    // Descending weight; sort_by is stable so equal weights keep
    // first-seen order.
    keywords.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    keywords
}

/// Parse `term:weight` lines from a generator response
pub fn parse_response(response: &str) -> Vec<WeightedKeyword> {
    let mut keywords = Vec::new();

    for line in response.lines() {
        let line = line.trim();
        let Some((term, weight)) = line.split_once(':') else {
            continue;
        };

        let term = term.trim().to_lowercase();
        let Ok(weight) = weight.trim().parse::<f64>() else {
            continue;
        };

        if term.chars().count() > 1 && (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
            keywords.push(WeightedKeyword::new(term, weight));
        }
    }

    keywords
}

/// Deterministic fallback: whitespace tokens of length > 2, maximum weight
pub fn fallback_keywords(question: &str) -> Vec<WeightedKeyword> {
    question
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .map(|word| WeightedKeyword::new(word, MAX_WEIGHT))
        .collect()
}
