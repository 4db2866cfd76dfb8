//! Article body extraction.
//!
//! A [`ContentExtractor`] runs an ordered cascade of [`Strategy`] values over
//! a parsed page. The first strategy that yields non-empty text wins; its
//! output is whitespace-collapsed and truncated to the configured length.
//! Publisher rules come first so that a site with known markup never falls
//! through to the generic strategies unless its containers are missing.

use std::collections::HashSet;

use naver_news_async::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, HeaderMap, HeaderValue};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, warn};
use url::Url;

use crate::messages;
use crate::normalize::host_matches;
use crate::settings::{DEFAULT_MAX_CONTENT_CHARS, DEFAULT_MIN_PARAGRAPH_CHARS};

/// Appended to bodies cut at the length limit
pub const TRUNCATION_MARKER: &str = "...";

/// Generic containers that usually hold an article body
pub const SEMANTIC_CONTAINERS: &[&str] = &["article", "main", ".article", ".content", ".news-content"];

/// Elements whose text never counts as article text
const NON_CONTENT: &[&str] = &["script", "style", "noscript"];

/// Site-specific extraction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublisherRule {
    pub name: &'static str,
    /// Hosts (and their subdomains) the rule applies to
    pub domains: &'static [&'static str],
    /// Candidate body containers; the first match in document order is used
    pub containers: &'static [&'static str],
    /// Sub-elements removed from the container before reading its text
    pub strip: &'static [&'static str],
}

/// Aggregator-hosted article pages.
pub const NAVER_NEWS: PublisherRule = PublisherRule {
    name: "naver-news",
    domains: &["news.naver.com"],
    containers: &[
        "#dic_area",
        "#newsct_article",
        "#articleBodyContents",
        "#articeBody",
        "#newsEndContents",
        ".news_end",
    ],
    strip: &[
        "script",
        "style",
        ".end_photo_org",
        ".reporter_area",
        ".byline",
        ".img_desc",
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Site-specific containers, only for matching hosts
    Publisher(PublisherRule),
    /// First generic article container in the page
    SemanticContainer,
    /// Every paragraph longer than the minimum, joined with spaces
    Paragraphs,
}

impl Strategy {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Publisher(rule) => rule.name,
            Self::SemanticContainer => "semantic-container",
            Self::Paragraphs => "paragraphs",
        }
    }

    fn apply(&self, doc: &Html, host: Option<&str>, min_paragraph_chars: usize) -> Option<String> {
        match self {
            Self::Publisher(rule) => {
                let host = host?;
                if !rule.domains.iter().any(|d| host_matches(host, d)) {
                    return None;
                }
                let container = first_match(doc, rule.containers)?;
                Some(text_excluding(container, &selectors(rule.strip)))
            }
            Self::SemanticContainer => {
                let container = first_match(doc, SEMANTIC_CONTAINERS)?;
                Some(text_excluding(container, &selectors(NON_CONTENT)))
            }
            Self::Paragraphs => {
                let paragraph = parse_selector("p")?;
                let skip = selectors(NON_CONTENT);
                let kept: Vec<String> = doc
                    .select(&paragraph)
                    .map(|p| collapse_whitespace(&text_excluding(p, &skip)))
                    .filter(|t| t.chars().count() > min_paragraph_chars)
                    .collect();
                Some(kept.join(" "))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentExtractor {
    cascade: Vec<Strategy>,
    max_chars: usize,
    min_paragraph_chars: usize,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_CHARS)
    }
}

impl ContentExtractor {
    /// Default cascade: the aggregator rule, then semantic containers, then
    /// long paragraphs.
    #[must_use]
    pub fn new(max_chars: usize) -> Self {
        Self {
            cascade: vec![
                Strategy::Publisher(NAVER_NEWS),
                Strategy::SemanticContainer,
                Strategy::Paragraphs,
            ],
            max_chars,
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
        }
    }

    #[must_use]
    pub const fn with_min_paragraph_chars(mut self, chars: usize) -> Self {
        self.min_paragraph_chars = chars;
        self
    }

    /// Adds a publisher rule after the existing ones and ahead of the generic
    /// strategies.
    #[must_use]
    pub fn with_publisher_rule(mut self, rule: PublisherRule) -> Self {
        let at = self
            .cascade
            .iter()
            .position(|s| !matches!(s, Strategy::Publisher(_)))
            .unwrap_or(self.cascade.len());
        self.cascade.insert(at, Strategy::Publisher(rule));
        self
    }

    #[must_use]
    pub fn cascade(&self) -> &[Strategy] {
        &self.cascade
    }

    /// Extracts readable body text from `html`, fetched from `source_url`.
    ///
    /// Returns [`messages::EXTRACTION_FAILED`] when no strategy finds text.
    #[must_use]
    pub fn extract(&self, html: &str, source_url: &str) -> String {
        let host = Url::parse(source_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase));
        let doc = Html::parse_document(html);

        for strategy in &self.cascade {
            let Some(raw) = strategy.apply(&doc, host.as_deref(), self.min_paragraph_chars) else {
                continue;
            };
            let text = collapse_whitespace(&raw);
            if !text.is_empty() {
                debug!(
                    url = source_url,
                    strategy = strategy.name(),
                    chars = text.chars().count(),
                    "Extracted article body"
                );
                return truncate_chars(&text, self.max_chars);
            }
        }

        debug!(url = source_url, "No extraction strategy matched");
        messages::EXTRACTION_FAILED.to_string()
    }

    /// Fetches `url` and extracts its body. Never fails: fetch errors come
    /// back as an inline failure message, held to the same length limit as
    /// extracted text.
    pub async fn fetch_and_extract(&self, client: &Client, url: &str) -> String {
        match client.fetch(url, &[], page_headers()).await {
            Ok(page) => {
                debug!(
                    url = %page.final_url,
                    content_type = page.content_type.as_deref().unwrap_or("unknown"),
                    "Parsing article page"
                );
                self.extract(&page.body, &page.final_url)
            }
            Err(e) => {
                error!(url, error = %e, "Article fetch failed");
                truncate_chars(&messages::extraction_error(&e.to_string()), self.max_chars)
            }
        }
    }
}

/// Request headers that make page fetches look like an ordinary browser.
#[must_use]
pub fn page_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers
}

/// Collapses every run of whitespace to a single space and trims the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keeps the first `max_chars` characters, appending [`TRUNCATION_MARKER`]
/// when anything was cut.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}{TRUNCATION_MARKER}", &text[..idx]),
        None => text.to_string(),
    }
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!(selector = css, error = ?e, "Skipping invalid selector");
            None
        }
    }
}

fn selectors(css: &[&str]) -> Vec<Selector> {
    css.iter().filter_map(|c| parse_selector(c)).collect()
}

fn first_match<'a>(doc: &'a Html, candidates: &[&str]) -> Option<ElementRef<'a>> {
    let group = parse_selector(&candidates.join(", "))?;
    doc.select(&group).next()
}

/// Text of `root`, skipping anything inside an element matched by `excluded`.
fn text_excluding(root: ElementRef<'_>, excluded: &[Selector]) -> String {
    let skipped: HashSet<_> = excluded
        .iter()
        .flat_map(|sel| root.select(sel))
        .map(|el| el.id())
        .collect();

    let mut parts = Vec::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        if node.ancestors().any(|a| skipped.contains(&a.id())) {
            continue;
        }
        let text = text.trim();
        if !text.is_empty() {
            parts.push(text);
        }
    }
    parts.join(" ")
}
