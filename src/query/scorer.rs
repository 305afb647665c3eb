//! Weighted relevance scoring
//!
//! A heuristic additive model, computed case-insensitively. The constants
//! are a fixed contract:
//!
//! - keyword equals the whole title: +50×w, else title substring: +20×w
//! - keyword as a whole word in the title: +25×w (additive with the above)
//! - keyword substring of the joined category list: +15×w
//! - each raw substring occurrence in the content: +2×w
//! - whole-word match in the first 200 content words: +5×w
//! - substring of an individual title word (keyword longer than 3): +3×w
//!   per matching word
//!
//! Scoring is stateless and read-only over the corpus; ranking excludes
//! zero-score pages and is stable, so ties keep corpus order.

use regex::Regex;

use crate::models::{MatchResult, Page, WeightedKeyword};

const EXACT_TITLE: f64 = 50.0;
const TITLE_SUBSTRING: f64 = 20.0;
const TITLE_WORD: f64 = 25.0;
const CATEGORY_SUBSTRING: f64 = 15.0;
const CONTENT_OCCURRENCE: f64 = 2.0;
const CONTENT_LEAD_WORD: f64 = 5.0;
const TITLE_PARTIAL_WORD: f64 = 3.0;

/// Number of leading content words scanned for whole-word matches
const CONTENT_LEAD_WORDS: usize = 200;

struct CompiledKeyword {
    term: String,
    weight: f64,
    /// Word-boundary matcher; None if the term cannot form one
    word_re: Option<Regex>,
}

/// Scores corpus pages against a fixed weighted keyword set
pub struct RelevanceScorer {
    keywords: Vec<CompiledKeyword>,
}

impl RelevanceScorer {
    /// Compile a keyword set for repeated scoring
    pub fn new(keywords: &[WeightedKeyword]) -> Self {
        let keywords = keywords
            .iter()
            .filter(|kw| !kw.term.is_empty())
            .map(|kw| {
                let term = kw.term.to_lowercase();
                let word_re = Regex::new(&format!(r"\b{}\b", regex::escape(&term))).ok();
                CompiledKeyword {
                    term,
                    weight: kw.weight,
                    word_re,
                }
            })
            .collect();
        Self { keywords }
    }

    /// Compute the match score for one page
    pub fn score(&self, page: &Page) -> f64 {
        let title = page.title.to_lowercase();
        let content = page.content.to_lowercase();
        let categories = page.categories.join(" ").to_lowercase();
        let content_lead: String = content
            .split_whitespace()
            .take(CONTENT_LEAD_WORDS)
            .collect::<Vec<_>>()
            .join(" ");

        let mut score = 0.0;

        for kw in &self.keywords {
            let weight = kw.weight;

            if kw.term == title {
                score += EXACT_TITLE * weight;
            } else if title.contains(&kw.term) {
                score += TITLE_SUBSTRING * weight;
            }

            if let Some(re) = &kw.word_re {
                if re.is_match(&title) {
                    score += TITLE_WORD * weight;
                }
                if re.is_match(&content_lead) {
                    score += CONTENT_LEAD_WORD * weight;
                }
            }

            if categories.contains(&kw.term) {
                score += CATEGORY_SUBSTRING * weight;
            }

            score += content.matches(&kw.term).count() as f64 * CONTENT_OCCURRENCE * weight;

            if kw.term.chars().count() > 3 {
                for word in title.split_whitespace() {
                    if word.contains(&kw.term) {
                        score += TITLE_PARTIAL_WORD * weight;
                    }
                }
            }
        }

        score
    }

    /// Rank pages by descending score, dropping zero scores
    ///
    /// Returns at most `top_n` results. The sort is stable, so equal scores
    /// keep their original corpus order.
    pub fn rank<'a>(&self, pages: &'a [Page], top_n: usize) -> Vec<MatchResult<'a>> {
        let mut results: Vec<MatchResult<'a>> = pages
            .iter()
            .map(|page| MatchResult {
                page,
                score: self.score(page),
            })
            .filter(|result| result.score > 0.0)
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_n);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, content: &str, categories: &[&str]) -> Page {
        Page::new(
            None,
            title.to_string(),
            format!("https://wiki.example.org/{}", title.replace(' ', "_")),
            content.to_string(),
            categories.iter().map(|c| c.to_string()).collect(),
        )
    }

    fn kw(term: &str, weight: f64) -> WeightedKeyword {
        WeightedKeyword::new(term, weight)
    }

    #[test]
    fn test_exact_title_match() {
        let scorer = RelevanceScorer::new(&[kw("docker", 2.0)]);
        let p = page("docker", "", &[]);
        // exact (50) + title word boundary (25), plus partial-word (3) for
        // len > 3, all times weight 2
        assert_eq!(scorer.score(&p), (50.0 + 25.0 + 3.0) * 2.0);
    }

    #[test]
    fn test_title_substring_vs_exact() {
        let scorer = RelevanceScorer::new(&[kw("docker", 1.0)]);
        let exact = page("docker", "", &[]);
        let partial = page("docker setup", "", &[]);
        assert!(scorer.score(&exact) > scorer.score(&partial));
    }

    #[test]
    fn test_content_occurrences_accumulate() {
        let scorer = RelevanceScorer::new(&[kw("abcd", 1.0)]);
        let once = page("x", "abcd here", &[]);
        let thrice = page("x", "abcd abcd abcd", &[]);
        // each raw occurrence adds 2.0
        assert_eq!(scorer.score(&thrice) - scorer.score(&once), 4.0);
    }

    #[test]
    fn test_category_match() {
        let scorer = RelevanceScorer::new(&[kw("devops", 1.0)]);
        let with_cat = page("x", "", &["DevOps"]);
        let without = page("x", "", &[]);
        assert_eq!(scorer.score(&with_cat) - scorer.score(&without), 15.0);
    }

    #[test]
    fn test_lead_word_boundary_bonus() {
        let scorer = RelevanceScorer::new(&[kw("rust", 1.0)]);
        // "rust" as a whole word early in content: occurrence (2) + lead (5)
        let p = page("x", "rust is great", &[]);
        assert_eq!(scorer.score(&p), 7.0);
    }

    #[test]
    fn test_lead_window_excludes_late_words() {
        let scorer = RelevanceScorer::new(&[kw("zz", 1.0)]);
        let mut words = vec!["filler"; 250];
        words[240] = "zz";
        let p = page("x", &words.join(" "), &[]);
        // occurrence only; word 241 is outside the 200-word window
        assert_eq!(scorer.score(&p), 2.0);
    }

    #[test]
    fn test_short_keyword_no_partial_title_bonus() {
        let scorer = RelevanceScorer::new(&[kw("ab", 1.0)]);
        let p = page("abxyz", "", &[]);
        // substring of title (20) but no partial-word bonus for len <= 3
        assert_eq!(scorer.score(&p), 20.0);
    }

    #[test]
    fn test_scoring_is_case_insensitive() {
        let scorer = RelevanceScorer::new(&[kw("docker", 1.0)]);
        let upper = page("DOCKER", "DOCKER GUIDE", &[]);
        let lower = page("docker", "docker guide", &[]);
        assert_eq!(scorer.score(&upper), scorer.score(&lower));
    }

    #[test]
    fn test_weight_scales_contribution() {
        let p = page("docker setup", "docker docker", &["DevOps"]);
        let low = RelevanceScorer::new(&[kw("docker", 1.0)]).score(&p);
        let high = RelevanceScorer::new(&[kw("docker", 5.0)]).score(&p);
        assert!(high > low);
        assert!((high - low * 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_excludes_zero_scores() {
        let pages = vec![
            page("docker", "docker", &[]),
            page("unrelated", "nothing here", &[]),
        ];
        let scorer = RelevanceScorer::new(&[kw("docker", 10.0)]);
        let ranked = scorer.rank(&pages, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].page.title, "docker");
    }

    #[test]
    fn test_rank_stable_on_ties() {
        let pages = vec![
            page("first twin", "same words", &[]),
            page("second twin", "same words", &[]),
        ];
        let scorer = RelevanceScorer::new(&[kw("same", 1.0)]);
        let ranked = scorer.rank(&pages, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].page.title, "first twin");
        assert_eq!(ranked[1].page.title, "second twin");
    }

    #[test]
    fn test_rank_truncates_to_top_n() {
        let pages: Vec<Page> = (0..5)
            .map(|i| page(&format!("p{i}"), "match word", &[]))
            .collect();
        let scorer = RelevanceScorer::new(&[kw("match", 1.0)]);
        assert_eq!(scorer.rank(&pages, 3).len(), 3);
    }
}
