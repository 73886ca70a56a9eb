//! Content extractor
//!
//! Recovers (author, content) posts from a thread page. Forum markup differs
//! between skins and versions, so extraction is an ordered table of
//! strategies tried until one yields at least one post. Later strategies are
//! broader and would over-match if tried first; results are never merged.

use scraper::{ElementRef, Html, Selector};

use crate::domain::entities::{Post, UNKNOWN_AUTHOR};
use crate::error::ConfigError;

/// Marker that identifies a post header in legacy table layouts
const LEGACY_HEADER_MARKER: &str = "Post by";
/// Word that ends the author name in a legacy header ("Post by X on <date>")
const LEGACY_AUTHOR_TERMINATOR: &str = "on";
/// Navigation link text that precedes the post body in legacy layouts
const LEGACY_BODY_MARKER: &str = "Back to Top";
/// Legacy cells shorter than this cannot hold a header plus a body
const LEGACY_MIN_CHARS: usize = 20;

/// CSS selectors describing the forum template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorSelectors {
    /// Element wrapping one message
    pub container: String,
    /// Message body, nested in the container (also used by the bare-body fallback)
    pub body: String,
    /// Author link inside the post's table row
    pub author: String,
}

impl Default for ExtractorSelectors {
    fn default() -> Self {
        Self {
            container: "td.content".to_string(),
            body: ".message".to_string(),
            author: "td.left-panel a".to_string(),
        }
    }
}

/// The strategy that recognised a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    Structured,
    Legacy,
    BareBody,
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionStrategy::Structured => write!(f, "structured"),
            ExtractionStrategy::Legacy => write!(f, "legacy"),
            ExtractionStrategy::BareBody => write!(f, "bare-body"),
        }
    }
}

type StrategyFn = fn(&PostExtractor, &Html) -> Option<Vec<Post>>;

/// Strategies in priority order
const STRATEGIES: [(ExtractionStrategy, StrategyFn); 3] = [
    (ExtractionStrategy::Structured, PostExtractor::structured),
    (ExtractionStrategy::Legacy, PostExtractor::legacy),
    (ExtractionStrategy::BareBody, PostExtractor::bare_body),
];

/// Post extractor with pre-parsed selectors
#[derive(Debug)]
pub struct PostExtractor {
    container: Selector,
    body: Selector,
    author: Selector,
    cell: Selector,
}

impl PostExtractor {
    pub fn new(selectors: &ExtractorSelectors) -> Result<Self, ConfigError> {
        Ok(Self {
            container: parse_selector(&selectors.container)?,
            body: parse_selector(&selectors.body)?,
            author: parse_selector(&selectors.author)?,
            cell: parse_selector("td")?,
        })
    }

    /// Extract posts from a thread document. Never fails: unrecognised
    /// markup yields an empty vector.
    pub fn extract(&self, document: &str) -> Vec<Post> {
        self.extract_with_strategy(document)
            .map(|(_, posts)| posts)
            .unwrap_or_default()
    }

    /// Extract posts and report which strategy recognised the document
    pub fn extract_with_strategy(&self, document: &str) -> Option<(ExtractionStrategy, Vec<Post>)> {
        let html = Html::parse_document(document);
        STRATEGIES
            .iter()
            .find_map(|(strategy, run)| run(self, &html).map(|posts| (*strategy, posts)))
    }

    /// Message containers with a nested body, author taken from the row's author cell
    fn structured(&self, html: &Html) -> Option<Vec<Post>> {
        let posts = html
            .select(&self.container)
            .filter_map(|container| {
                let body = container.select(&self.body).next()?;
                let content = element_text(body);
                if content.is_empty() {
                    return None;
                }
                let author = self
                    .row_author(container)
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
                Some(Post::new(author, content))
            })
            .collect();
        non_empty(posts)
    }

    fn row_author(&self, container: ElementRef<'_>) -> Option<String> {
        let row = container
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "tr")?;
        row.select(&self.author)
            .map(element_text)
            .find(|name| !name.is_empty())
    }

    /// Table cells carrying a "Post by X on ..." header
    fn legacy(&self, html: &Html) -> Option<Vec<Post>> {
        let posts = html
            .select(&self.cell)
            .filter(|cell| is_legacy_post_cell(&element_text(*cell)))
            .filter(|cell| !self.has_nested_post_cell(*cell))
            .filter_map(|cell| parse_legacy_cell(&element_text(cell)))
            .collect();
        non_empty(posts)
    }

    /// Layout cells wrapping a whole post table also carry the header text;
    /// only the innermost qualifying cell is the post.
    fn has_nested_post_cell(&self, cell: ElementRef<'_>) -> bool {
        cell.select(&self.cell)
            .filter(|inner| *inner != cell)
            .any(|inner| is_legacy_post_cell(&element_text(inner)))
    }

    /// Any message body, regardless of surrounding structure
    fn bare_body(&self, html: &Html) -> Option<Vec<Post>> {
        let posts = html
            .select(&self.body)
            .map(element_text)
            .filter(|content| !content.is_empty())
            .map(Post::anonymous)
            .collect();
        non_empty(posts)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

fn non_empty(posts: Vec<Post>) -> Option<Vec<Post>> {
    if posts.is_empty() {
        None
    } else {
        Some(posts)
    }
}

/// Descendant text with each node trimmed and joined by single spaces
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_legacy_post_cell(text: &str) -> bool {
    text.chars().count() >= LEGACY_MIN_CHARS && text.contains(LEGACY_HEADER_MARKER)
}

/// Split a legacy cell into author and content.
///
/// The author is whatever sits between "Post by" and the next "on", which
/// can cut names containing "on" short; that matches how these headers have
/// always been read.
fn parse_legacy_cell(text: &str) -> Option<Post> {
    let author = text
        .split_once(LEGACY_HEADER_MARKER)
        .map(|(_, after)| {
            after
                .split_once(LEGACY_AUTHOR_TERMINATOR)
                .map_or(after, |(name, _)| name)
                .trim()
        })
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_AUTHOR);

    let content = text
        .split_once(LEGACY_BODY_MARKER)
        .map_or(text, |(_, body)| body)
        .trim();

    if content.is_empty() {
        return None;
    }
    Some(Post::new(author, content))
}
