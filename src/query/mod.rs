//! Question answering over the scraped corpus
//!
//! Query flow: extract weighted keywords for the question, rank the corpus
//! with the [`RelevanceScorer`], format the top pages as context, and hand
//! one combined prompt to the generator. The corpus is read-only here; a
//! crawl and a query never share mutable state.

pub mod keywords;
pub mod prompt;
pub mod scorer;

pub use scorer::RelevanceScorer;

use crate::llm::TextGenerator;
use crate::models::Page;

/// Answers questions using the corpus and an injected generator
pub struct Assistant<G> {
    generator: G,
    pages: Vec<Page>,

    /// How many top-ranked pages are handed to the generator
    context_pages: usize,
}

impl<G: TextGenerator> Assistant<G> {
    pub fn new(generator: G, pages: Vec<Page>, context_pages: usize) -> Self {
        Self {
            generator,
            pages,
            context_pages,
        }
    }

    /// Number of corpus pages available to this assistant
    pub fn corpus_len(&self) -> usize {
        self.pages.len()
    }

    /// Answer a question
    ///
    /// Always returns a string: total generator failure produces a visible
    /// error message instead of propagating.
    pub async fn answer(&self, question: &str) -> String {
        let question = question.trim();
        if question.is_empty() {
            return "Please ask me something!".to_string();
        }

        tracing::info!(question = %question, "Processing question");

        let keywords = keywords::extract(&self.generator, question).await;
        tracing::debug!(count = keywords.len(), "Extracted keywords");

        let scorer = RelevanceScorer::new(&keywords);
        let ranked = scorer.rank(&self.pages, self.context_pages);
        tracing::info!(
            relevant = ranked.len(),
            top = ranked.first().map(|r| r.page.title.as_str()).unwrap_or("-"),
            "Ranked corpus pages"
        );

        let top: Vec<&Page> = ranked.iter().map(|r| r.page).collect();
        let context = prompt::format_context(&top);
        let full_prompt = prompt::answer_prompt(question, &context);

        match self.generator.generate(&full_prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "Generation failed");
                format!("Sorry, the answer service failed: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use std::sync::Mutex;

    /// Returns canned keywords for the keyword prompt, echoes the final
    /// prompt back for the answer, and records it for inspection.
    struct ScriptedGenerator {
        keywords: &'static str,
        last_answer_prompt: Mutex<Option<String>>,
        fail_answers: bool,
    }

    impl ScriptedGenerator {
        fn new(keywords: &'static str) -> Self {
            Self {
                keywords,
                last_answer_prompt: Mutex::new(None),
                fail_answers: false,
            }
        }
    }

    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            if prompt.contains("Keywords with weights:") {
                return Ok(self.keywords.to_string());
            }
            if self.fail_answers {
                return Err(LlmError::Status(502));
            }
            *self.last_answer_prompt.lock().unwrap() = Some(prompt.to_string());
            Ok("the answer".to_string())
        }
    }

    fn corpus() -> Vec<Page> {
        vec![
            Page::new(
                None,
                "Docker Setup".into(),
                "https://w/docker".into(),
                "docker container deployment guide".into(),
                vec!["DevOps".into()],
            ),
            Page::new(
                None,
                "Random Topic".into(),
                "https://w/random".into(),
                "unrelated text docker mentioned once".into(),
                vec![],
            ),
        ]
    }

    #[tokio::test]
    async fn test_answer_ranks_context_pages() {
        let generator = ScriptedGenerator::new("docker:10");
        let assistant = Assistant::new(generator, corpus(), 10);

        let answer = assistant.answer("how do I use docker?").await;
        assert_eq!(answer, "the answer");

        let prompt = assistant
            .generator
            .last_answer_prompt
            .lock()
            .unwrap()
            .clone()
            .unwrap();
        let docker_pos = prompt.find("Docker Setup").unwrap();
        let random_pos = prompt.find("Random Topic").unwrap();
        assert!(
            docker_pos < random_pos,
            "strong match must come first in context"
        );
        assert!(prompt.contains("how do I use docker?"));
    }

    #[tokio::test]
    async fn test_answer_empty_question() {
        let generator = ScriptedGenerator::new("docker:10");
        let assistant = Assistant::new(generator, corpus(), 10);
        assert_eq!(assistant.answer("   ").await, "Please ask me something!");
    }

    #[tokio::test]
    async fn test_generation_failure_yields_error_string() {
        let mut generator = ScriptedGenerator::new("docker:10");
        generator.fail_answers = true;
        let assistant = Assistant::new(generator, corpus(), 10);

        let answer = assistant.answer("docker?").await;
        assert!(answer.contains("failed"));
    }
}
