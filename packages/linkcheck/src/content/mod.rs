//! Main-content detection and visible text extraction.
//!
//! The content region is chosen by trying an ordered list of selector
//! strategies against the parsed page; the first strategy with a match wins and
//! the whole document is the fallback.

use scraper::{ElementRef, Html, Node, Selector};

use crate::types::record::ContentSignificance;

/// Elements whose text never renders.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// Where the measured text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRegion {
    /// First `<main>` element
    Main,
    /// First `<article>` element
    Article,
    /// First element with a `content` class
    ContentClass,
    /// No hint matched; the entire document
    Document,
}

impl ContentRegion {
    /// Selector strategies in precedence order. `Document` is the fallback and
    /// is not listed.
    pub const STRATEGIES: [ContentRegion; 3] = [
        ContentRegion::Main,
        ContentRegion::Article,
        ContentRegion::ContentClass,
    ];

    /// CSS selector for this strategy, `None` for the document fallback.
    pub fn selector(self) -> Option<&'static str> {
        match self {
            Self::Main => Some("main"),
            Self::Article => Some("article"),
            Self::ContentClass => Some(".content"),
            Self::Document => None,
        }
    }

    /// First element in `document` this strategy matches.
    pub fn find(self, document: &Html) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(self.selector()?).ok()?;
        document.select(&selector).next()
    }
}

/// Text extracted from a page's content region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentText {
    pub region: ContentRegion,
    pub text: String,
}

impl ContentText {
    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn significance(&self, min_chars: usize) -> ContentSignificance {
        ContentSignificance::from_len(self.char_len(), min_chars)
    }
}

/// Pick the content region: first strategy with a match, else the root element.
pub fn select_content_region(document: &Html) -> (ContentRegion, ElementRef<'_>) {
    ContentRegion::STRATEGIES
        .iter()
        .find_map(|region| region.find(document).map(|element| (*region, element)))
        .unwrap_or_else(|| (ContentRegion::Document, document.root_element()))
}

/// Visible text under `element`: every non-empty text node, trimmed, joined
/// with a single space.
pub fn extract_visible_text(element: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    collect_text(element, &mut parts);
    parts.join(" ")
}

fn collect_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed);
                }
            }
            Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, parts);
                }
            }
            _ => {}
        }
    }
}

/// Parse `html` and extract the text of its main content region.
pub fn main_content_text(html: &str) -> ContentText {
    let document = Html::parse_document(html);
    let (region, element) = select_content_region(&document);
    ContentText {
        region,
        text: extract_visible_text(element),
    }
}
