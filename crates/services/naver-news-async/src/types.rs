use serde::{Deserialize, Serialize};

/// Largest `display` value the API accepts
pub const MAX_DISPLAY: u32 = 100;
/// Largest `start` value the API accepts
pub const MAX_START: u32 = 1000;

/// Result ordering for news search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Relevance ("sim")
    #[default]
    Sim,
    /// Newest first
    Date,
}

impl SortMode {
    /// Wire value for the `sort` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sim => "sim",
            Self::Date => "date",
        }
    }
}

/// Request for `GET /v1/search/news.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSearchRequest {
    /// Search keyword
    pub query: String,
    /// Number of items to return (1..=100)
    pub display: u32,
    /// 1-based offset of the first item (1..=1000)
    pub start: u32,
    /// Ordering
    pub sort: SortMode,
}

impl NewsSearchRequest {
    /// Creates a request for `query` with the API defaults (10 items, relevance order).
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            display: 10,
            start: 1,
            sort: SortMode::default(),
        }
    }

    /// Sets the number of items, clamped to the accepted range
    #[must_use]
    pub fn with_display(mut self, display: u32) -> Self {
        self.display = display.clamp(1, MAX_DISPLAY);
        self
    }

    /// Sets the offset, clamped to the accepted range
    #[must_use]
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start.clamp(1, MAX_START);
        self
    }

    /// Sets the ordering
    #[must_use]
    pub const fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Query parameters in wire form
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("display", self.display.to_string()),
            ("start", self.start.to_string()),
            ("sort", self.sort.as_str().to_string()),
        ]
    }
}

/// Response body of the news search endpoint.
///
/// `items` is required; a body without it is treated as malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSearchResponse {
    /// RFC 2822 timestamp of the search
    #[serde(default)]
    pub last_build_date: Option<String>,
    /// Total number of matches upstream
    #[serde(default)]
    pub total: Option<u64>,
    /// Offset of the first returned item
    #[serde(default)]
    pub start: Option<u32>,
    /// Number of returned items
    #[serde(default)]
    pub display: Option<u32>,
    /// Matches in upstream order
    pub items: Vec<RawNewsItem>,
}

/// One news item as returned by the API.
///
/// `title` and `description` carry `<b>` emphasis around matched keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNewsItem {
    /// Headline with emphasis markup
    #[serde(default)]
    pub title: Option<String>,
    /// Publisher's own article URL
    #[serde(default)]
    pub originallink: Option<String>,
    /// Article URL (Naver-hosted when available)
    #[serde(default)]
    pub link: Option<String>,
    /// Summary with emphasis markup
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 2822 publication time, e.g. `Mon, 05 May 2025 10:30:00 +0900`
    #[serde(default)]
    pub pub_date: Option<String>,
}
