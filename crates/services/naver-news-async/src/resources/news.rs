use tracing::debug;

use crate::{
    client::Client,
    error::{NaverError, map_deser},
    types::{NewsSearchRequest, NewsSearchResponse},
};

/// Path of the news search endpoint
pub const NEWS_SEARCH_PATH: &str = "/v1/search/news.json";

/// API resource for the news search endpoint
pub struct News<'c> {
    client: &'c Client,
}

impl<'c> News<'c> {
    /// Creates a new News resource
    #[must_use]
    pub const fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Execute a news search.
    ///
    /// Credentials are checked before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`NaverError::Config`] without network I/O when credentials are
    /// missing, the fetcher's errors for transport and status failures, and
    /// [`NaverError::Malformed`] when the body is not the expected JSON.
    pub async fn search(&self, req: &NewsSearchRequest) -> Result<NewsSearchResponse, NaverError> {
        let config = self.client.config();
        let headers = config.credential_headers()?;

        let page = self
            .client
            .fetch(&config.url(NEWS_SEARCH_PATH), &req.query_pairs(), headers)
            .await?;

        let resp: NewsSearchResponse =
            serde_json::from_str(&page.body).map_err(|e| map_deser(&e, &page.body))?;
        debug!(
            query = %req.query,
            total = resp.total,
            returned = resp.items.len(),
            "News search completed"
        );
        Ok(resp)
    }
}

impl Client {
    /// Returns the News API resource
    #[must_use]
    pub const fn news(&self) -> News<'_> {
        News::new(self)
    }
}
