//! Tunables for search, extraction and page fetching.

use std::time::Duration;

use naver_news_async::RetryPolicy;
use naver_news_async::client::DEFAULT_TIMEOUT;
use naver_news_async::types::SortMode;
use tracing::warn;

/// Upper bound on items returned per search
pub const MAX_NEWS_ITEMS: u32 = 20;
/// Default cap on extracted body length, in characters
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 1000;
/// Paragraphs at or below this length are skipped by the paragraph fallback
pub const DEFAULT_MIN_PARAGRAPH_CHARS: usize = 50;
/// Default number of article pages fetched at once
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Overrides [`DEFAULT_MAX_CONCURRENT_FETCHES`]
pub const ENV_MAX_CONCURRENT_FETCHES: &str = "NEWS_MAX_CONCURRENT_FETCHES";
/// Overrides the per-request timeout, in whole seconds
pub const ENV_HTTP_TIMEOUT_SECS: &str = "NEWS_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSettings {
    /// Items requested from the search API (1..=20)
    pub max_items: u32,
    pub sort: SortMode,
    /// Extracted bodies longer than this are truncated
    pub max_content_chars: usize,
    pub min_paragraph_chars: usize,
    /// Concurrent article fetches (at least 1)
    pub max_concurrent_fetches: usize,
    /// Per-request timeout for both search and page fetches
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            max_items: MAX_NEWS_ITEMS,
            sort: SortMode::Sim,
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl NewsSettings {
    /// Defaults with environment overrides applied. Unparseable or zero
    /// values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(n) = env_positive(ENV_MAX_CONCURRENT_FETCHES) {
            settings.max_concurrent_fetches = usize::try_from(n).unwrap_or(usize::MAX);
        }
        if let Some(secs) = env_positive(ENV_HTTP_TIMEOUT_SECS) {
            settings.timeout = Duration::from_secs(secs);
        }
        settings
    }

    /// Pulls every bounded field back into range. Field writes and struct
    /// literals bypass the builder clamps.
    #[must_use]
    pub fn clamped(self) -> Self {
        let (items, fetches) = (self.max_items, self.max_concurrent_fetches);
        self.with_max_items(items).with_max_concurrent_fetches(fetches)
    }

    #[must_use]
    pub fn with_max_items(mut self, max_items: u32) -> Self {
        self.max_items = max_items.clamp(1, MAX_NEWS_ITEMS);
        self
    }

    #[must_use]
    pub const fn with_max_content_chars(mut self, chars: usize) -> Self {
        self.max_content_chars = chars;
        self
    }

    #[must_use]
    pub const fn with_min_paragraph_chars(mut self, chars: usize) -> Self {
        self.min_paragraph_chars = chars;
        self
    }

    #[must_use]
    pub fn with_max_concurrent_fetches(mut self, n: usize) -> Self {
        self.max_concurrent_fetches = n.max(1);
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

fn env_positive(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            warn!(key, value = %raw, "Ignoring invalid setting; expected a positive integer");
            None
        }
    }
}
