//! Search orchestration: query the API, normalize, optionally enrich each item
//! with its article body, and render the bundle as text.

use futures::future::join_all;
use naver_news_async::NaverError;
use naver_news_async::types::NewsSearchRequest;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::NewsTools;
use crate::messages;
use crate::normalize::NewsItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Publisher, title, time and link only
    Headlines,
    /// Every item also carries its extracted body
    WithContent,
}

/// Normalized results for one keyword, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsBundle {
    pub keyword: String,
    /// Total hits reported by the API
    pub total: u64,
    pub items: Vec<NewsItem>,
    pub mode: SearchMode,
}

impl NewsBundle {
    /// Renders the summary line, one numbered block per item, and the
    /// analysis request that matches the mode.
    #[must_use]
    pub fn render(&self) -> String {
        let summary = match self.mode {
            SearchMode::Headlines => format!(
                "Found {} of {} news articles about \"{}\".",
                self.items.len(),
                self.total,
                self.keyword
            ),
            SearchMode::WithContent => format!(
                "Found {} of {} news articles about \"{}\" with titles and bodies.",
                self.items.len(),
                self.total,
                self.keyword
            ),
        };
        let blocks: Vec<String> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| render_item(i + 1, item))
            .collect();
        let request = match self.mode {
            SearchMode::Headlines => messages::HEADLINE_ANALYSIS_REQUEST,
            SearchMode::WithContent => messages::CONTENT_ANALYSIS_REQUEST,
        };

        format!("{summary}\n\n{}\n\n{request}", blocks.join("\n\n"))
    }
}

fn render_item(n: usize, item: &NewsItem) -> String {
    let mut block = format!(
        "{n}. [Publisher] {}\n   [Title] {}\n   [Time] {}\n   [Link] {}",
        item.publisher, item.title, item.published_at, item.link
    );
    if let Some(body) = &item.body {
        block.push_str("\n   [Body]\n");
        block.push_str(body);
    }
    block
}

/// Why a search produced no bundle. Every variant has a user-facing message.
#[derive(Debug, Error)]
pub enum SearchFailure {
    #[error("empty keyword")]
    EmptyKeyword,
    #[error("no results for '{keyword}'")]
    NoResults { keyword: String },
    #[error(transparent)]
    Upstream(#[from] NaverError),
}

impl SearchFailure {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyKeyword => messages::EMPTY_KEYWORD.to_string(),
            Self::NoResults { keyword } => messages::no_results(keyword),
            Self::Upstream(e) => messages::for_search_error(e),
        }
    }
}

impl NewsTools {
    /// Runs one search and, in [`SearchMode::WithContent`], fetches every
    /// article body concurrently. Item order always matches the API's order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchFailure`] for an empty keyword, an empty result set, or
    /// any search API failure. Per-article fetch failures are not errors; they
    /// become that item's body text.
    pub async fn search(&self, keyword: &str, mode: SearchMode) -> Result<NewsBundle, SearchFailure> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(SearchFailure::EmptyKeyword);
        }

        info!(keyword, ?mode, "Searching news");
        let req = NewsSearchRequest::new(keyword)
            .with_display(self.settings.max_items)
            .with_sort(self.settings.sort);
        let resp = self.client.news().search(&req).await.map_err(|e| {
            error!(keyword, error = %e, "News search failed");
            SearchFailure::Upstream(e)
        })?;

        if resp.items.is_empty() {
            warn!(keyword, "News search returned no items");
            return Err(SearchFailure::NoResults {
                keyword: keyword.to_string(),
            });
        }

        let cap = usize::try_from(self.settings.max_items).unwrap_or(usize::MAX);
        let mut items: Vec<NewsItem> = resp
            .items
            .iter()
            .take(cap)
            .map(NewsItem::from_raw)
            .collect();
        let total = resp.total.unwrap_or(items.len() as u64);
        info!(keyword, total, returned = items.len(), "Found news items");

        if mode == SearchMode::WithContent {
            items = self.enrich(items).await;
        }

        Ok(NewsBundle {
            keyword: keyword.to_string(),
            total,
            items,
            mode,
        })
    }

    /// Headlines for `keyword`, or the user message for why there are none.
    pub async fn search_news(&self, keyword: &str) -> String {
        self.render_search(keyword, SearchMode::Headlines).await
    }

    /// Like [`Self::search_news`] but each item carries its article body.
    pub async fn search_news_with_content(&self, keyword: &str) -> String {
        self.render_search(keyword, SearchMode::WithContent).await
    }

    /// Enriched search plus an instruction to contrast publisher viewpoints.
    /// The instruction is appended to error messages too.
    pub async fn compare_news_perspectives(&self, keyword: &str) -> String {
        let text = self.search_news_with_content(keyword).await;
        format!("{text}\n\n{}", messages::PERSPECTIVE_INSTRUCTION)
    }

    /// Connectivity check; echoes its input.
    #[must_use]
    pub fn simple_test(&self, text: &str) -> String {
        format!("{}{text}", messages::ECHO_PREFIX)
    }

    async fn render_search(&self, keyword: &str, mode: SearchMode) -> String {
        match self.search(keyword, mode).await {
            Ok(bundle) => bundle.render(),
            Err(failure) => failure.user_message(),
        }
    }

    async fn enrich(&self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        let bodies = join_all(items.iter().map(|item| self.fetch_body(&item.link))).await;
        items
            .into_iter()
            .zip(bodies)
            .map(|(item, body)| item.with_body(body))
            .collect()
    }

    async fn fetch_body(&self, link: &str) -> String {
        let Ok(_permit) = self.fetch_permits.acquire().await else {
            return messages::extraction_error("fetch limiter closed");
        };
        self.extractor.fetch_and_extract(&self.client, link).await
    }
}
