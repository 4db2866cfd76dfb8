//! News context tools: keyword search over the Naver news API, optional
//! article-body enrichment, and the fixed analysis prompt.
//!
//! [`NewsTools`] owns the shared client, the extraction cascade and the
//! concurrency limiter for page fetches. Everything else hangs off it.

pub mod aggregate;
pub mod extract;
pub mod messages;
pub mod normalize;
pub mod prompts;
pub mod settings;
pub mod tools;
pub mod types;

use naver_news_async::{Client, NaverConfig, NaverError};
use tokio::sync::Semaphore;

pub use aggregate::{NewsBundle, SearchFailure, SearchMode};
pub use extract::{ContentExtractor, PublisherRule, Strategy};
pub use normalize::NewsItem;
pub use settings::NewsSettings;
pub use tools::{NewsTool, ToolCallError};

/// Shared state behind every news tool.
pub struct NewsTools {
    client: Client,
    settings: NewsSettings,
    extractor: ContentExtractor,
    fetch_permits: Semaphore,
}

impl NewsTools {
    /// Builds the tools with a client configured from `config` and `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: NaverConfig, settings: NewsSettings) -> Result<Self, NaverError> {
        let client = Client::with_config(config)?
            .with_timeout(settings.timeout)?
            .with_retry_policy(settings.retry);
        Ok(Self::with_client(client, settings))
    }

    /// Builds the tools around an existing client. The client's timeout and
    /// retry policy are used as-is; out-of-range settings are clamped.
    #[must_use]
    pub fn with_client(client: Client, settings: NewsSettings) -> Self {
        let settings = settings.clamped();
        let extractor = ContentExtractor::new(settings.max_content_chars)
            .with_min_paragraph_chars(settings.min_paragraph_chars);
        let fetch_permits = Semaphore::new(settings.max_concurrent_fetches);
        Self {
            client,
            settings,
            extractor,
            fetch_permits,
        }
    }

    /// Replaces the extraction cascade.
    #[must_use]
    pub fn with_extractor(mut self, extractor: ContentExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &NewsSettings {
        &self.settings
    }

    /// Whether search API credentials are configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.client.config().has_credentials()
    }
}
