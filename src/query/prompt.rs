//! Prompt construction for the generation endpoint

use crate::models::Page;

/// Prompt asking the generator for weighted keywords
pub fn keyword_prompt(question: &str) -> String {
    format!(
        "Extract keywords with importance weights from this question for \
searching a technical wiki database.

Question: {question}

Instructions:
- Extract 5-15 keywords with their importance weights (1-10, where 10 is most important)
- Include exact terms from the question with highest weights
- Format as: keyword:weight (one per line)
- No explanations, just keyword:weight pairs
- Only generate necessary keywords
- Don't assume keywords, just generate based on the question.
- Ignore common words like \"the\", \"is\", \"in\", \"what\", \"how\", \"why\".

Example format:
docker:10
container:9
deployment:2
devops:1

Keywords with weights:"
    )
}

/// Format the selected pages as a context block
pub fn format_context(pages: &[&Page]) -> String {
    if pages.is_empty() {
        return "No relevant wiki pages found.".to_string();
    }

    let mut context = String::from("Relevant wiki pages:\n\n");
    for (i, page) in pages.iter().enumerate() {
        context.push_str(&format!("=== Page {}: {} ===\n", i + 1, page.title));
        if !page.categories.is_empty() {
            context.push_str(&format!("Categories: {}\n", page.categories.join(", ")));
        }
        context.push_str(&format!("URL: {}\n", page.url));
        context.push_str(&format!("Content: {}\n\n", page.content));
    }
    context
}

/// Prompt combining the question with its wiki context
pub fn answer_prompt(question: &str, context: &str) -> String {
    format!(
        "You are a helpful assistant for a technical wiki.

I have selected the most relevant pages from the wiki database based on your question:

{context}

User Question: {question}

Instructions:
- Use the wiki information above to answer the user's question
- Reference specific pages, tutorials, or resources when relevant
- If the question is not fully covered in the wiki, provide helpful general information
- Mention page titles when referencing specific information
- Keep answers comprehensive but well-organized

Answer:"
    )
}
