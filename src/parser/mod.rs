//! MediaWiki HTML page extraction
//!
//! Turns a fetched HTML document into a [`Page`]: title from the
//! `firstHeading` element (falling back to the document `<title>`), plain
//! text from the content container with navigation/infobox/TOC noise
//! stripped, and category names from `Category:` links.
//!
//! Extraction degrades gracefully: a missing content container yields empty
//! content and a zero word count rather than an error. Only a page with no
//! title element at all fails, and systematic crawls paper over even that
//! with a placeholder title derived from the revision id.

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::ExtractError;
use crate::models::Page;
use crate::utils::normalize_whitespace;

/// CSS classes of elements excluded from extracted content
const NOISE_CLASSES: &[&str] = &["navbox", "infobox", "toc"];

/// Wiki page parser with pre-compiled selectors
pub struct WikiParser {
    first_heading: Selector,
    doc_title: Selector,
    content: Selector,
    category_links: Selector,
}

impl WikiParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            first_heading: Selector::parse("h1#firstHeading").expect("valid selector"),
            doc_title: Selector::parse("title").expect("valid selector"),
            content: Selector::parse("div#mw-content-text").expect("valid selector"),
            category_links: Selector::parse(r#"a[href*="Category:"]"#).expect("valid selector"),
        }
    }

    /// Extract a [`Page`] from fetched HTML
    ///
    /// # Arguments
    /// * `html` - Raw HTML document
    /// * `url` - Resolved URL after redirects
    /// * `oldid` - Revision id when fetched systematically
    ///
    /// # Errors
    /// Returns `ExtractError::TitleNotFound` when the document has neither a
    /// page heading nor a `<title>` and no `oldid` placeholder is available.
    pub fn extract(&self, html: &str, url: &str, oldid: Option<u64>) -> Result<Page, ExtractError> {
        let document = Html::parse_document(html);

        let title = self.extract_title(&document, oldid)?;
        let content = self.extract_content(&document);
        let categories = self.extract_categories(&document);

        Ok(Page::new(oldid, title, url.to_string(), content, categories))
    }

    fn extract_title(&self, document: &Html, oldid: Option<u64>) -> Result<String, ExtractError> {
        let heading = document
            .select(&self.first_heading)
            .next()
            .or_else(|| document.select(&self.doc_title).next());

        match heading {
            Some(el) => Ok(normalize_whitespace(&el.text().collect::<String>())),
            None => match oldid {
                Some(id) => Ok(format!("Page {id}")),
                None => Err(ExtractError::TitleNotFound),
            },
        }
    }

    fn extract_content(&self, document: &Html) -> String {
        let Some(container) = document.select(&self.content).next() else {
            return String::new();
        };

        let mut text = String::new();
        collect_text(container, &mut text);
        normalize_whitespace(&text)
    }

    fn extract_categories(&self, document: &Html) -> Vec<String> {
        let mut categories = Vec::new();
        for link in document.select(&self.category_links) {
            let name = normalize_whitespace(&link.text().collect::<String>());
            if !name.is_empty() && !categories.contains(&name) {
                categories.push(name);
            }
        }
        categories
    }
}

impl Default for WikiParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively collect text below an element, skipping noise subtrees
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !is_noise(&child_el) {
                        collect_text(child_el, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Noise elements: navigation boxes, infoboxes, and the table of contents
fn is_noise(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    if value.id() == Some("toc") {
        return true;
    }
    value
        .classes()
        .any(|class| NOISE_CLASSES.contains(&class))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <html>
          <head><title>Docker Setup - Wiki</title></head>
          <body>
            <h1 id="firstHeading">Docker Setup</h1>
            <div id="mw-content-text">
              <p>docker container deployment guide</p>
              <div class="toc">Contents 1 Intro 2 Steps</div>
              <table class="infobox"><tr><td>sidebar junk</td></tr></table>
              <p>second paragraph</p>
            </div>
            <a href="/index.php/Category:DevOps">DevOps</a>
            <a href="/index.php/Category:Containers">Containers</a>
            <a href="/index.php/Category:DevOps">DevOps</a>
          </body>
        </html>"#;

    #[test]
    fn test_extract_full_page() {
        let parser = WikiParser::new();
        let page = parser
            .extract(SAMPLE, "https://wiki.example.org/index.php?oldid=7", Some(7))
            .unwrap();

        assert_eq!(page.title, "Docker Setup");
        assert_eq!(
            page.content,
            "docker container deployment guide second paragraph"
        );
        assert_eq!(page.categories, vec!["DevOps", "Containers"]);
        assert_eq!(page.word_count, 6);
        assert_eq!(page.oldid, Some(7));
    }

    #[test]
    fn test_noise_elements_stripped() {
        let parser = WikiParser::new();
        let page = parser.extract(SAMPLE, "u", Some(7)).unwrap();
        assert!(!page.content.contains("sidebar junk"));
        assert!(!page.content.contains("Contents"));
    }

    #[test]
    fn test_title_falls_back_to_document_title() {
        let html = r#"<html><head><title>Fallback Title</title></head>
            <body><div id="mw-content-text">text</div></body></html>"#;
        let parser = WikiParser::new();
        let page = parser.extract(html, "u", None).unwrap();
        assert_eq!(page.title, "Fallback Title");
    }

    #[test]
    fn test_missing_content_degrades_to_empty() {
        let html = r#"<html><body><h1 id="firstHeading">Bare</h1></body></html>"#;
        let parser = WikiParser::new();
        let page = parser.extract(html, "u", None).unwrap();
        assert_eq!(page.content, "");
        assert_eq!(page.word_count, 0);
        assert!(page.categories.is_empty());
    }

    #[test]
    fn test_missing_title_uses_oldid_placeholder() {
        let html = "<html><body><p>no heading</p></body></html>";
        let parser = WikiParser::new();
        let page = parser.extract(html, "u", Some(42)).unwrap();
        assert_eq!(page.title, "Page 42");
    }

    #[test]
    fn test_missing_title_without_oldid_is_error() {
        let html = "<html><body><p>no heading</p></body></html>";
        let parser = WikiParser::new();
        let result = parser.extract(html, "u", None);
        assert!(matches!(result, Err(ExtractError::TitleNotFound)));
    }
}
