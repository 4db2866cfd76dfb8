//! User-facing texts returned by the tools. Tool failures are reported as
//! one of these strings rather than as protocol errors.

use naver_news_async::NaverError;

pub const EMPTY_KEYWORD: &str = "Please enter a search term.";
pub const TIMEOUT: &str = "The search timed out. Please try again shortly.";
pub const AUTH_FAILED: &str = "API authentication failed. Please check the API credentials.";
pub const RATE_LIMITED: &str = "Too many requests were sent. Please try again shortly.";
pub const SERVER_ERROR: &str = "The server returned an error. Please try again shortly.";
pub const NETWORK: &str =
    "A network connection problem occurred. Please check the internet connection.";
pub const EXTRACTION_FAILED: &str = "Could not extract the article body.";
pub const ECHO_PREFIX: &str = "Received text: ";

pub const HEADLINE_ANALYSIS_REQUEST: &str = "\
Please analyze the context and key points of these news articles. Cover the following:
1. The common theme across the headlines
2. Three key keywords
3. Which event or issue they cover
4. The social, economic, or political context these articles suggest
";

pub const CONTENT_ANALYSIS_REQUEST: &str = "\
Based on the full articles above, please analyze:
1. A summary of the main event or issue (5-6 sentences)
2. Key people, organizations, and places
3. Differences in perspective between publishers
4. Social, economic, and political context and impact
5. How the story is likely to develop
";

pub const PERSPECTIVE_INSTRUCTION: &str =
    "Focus especially on how each publisher's perspective and framing differ.";

#[must_use]
pub fn no_results(keyword: &str) -> String {
    format!("No news results found for '{keyword}'.")
}

#[must_use]
pub fn http_error(status: u16) -> String {
    format!("An error occurred during the search (HTTP {status}).")
}

#[must_use]
pub fn malformed(detail: &str) -> String {
    format!("Could not process the search results: {detail}")
}

#[must_use]
pub fn unexpected(detail: &str) -> String {
    format!("An unexpected error occurred while searching news: {detail}")
}

#[must_use]
pub fn extraction_error(detail: &str) -> String {
    format!("Failed to extract article content: {detail}")
}

/// Maps a search failure onto the fixed user message for its category.
#[must_use]
pub fn for_search_error(err: &NaverError) -> String {
    match err {
        NaverError::Timeout => TIMEOUT.to_string(),
        NaverError::HttpStatus { status, .. } => match *status {
            401 | 403 => AUTH_FAILED.to_string(),
            429 => RATE_LIMITED.to_string(),
            s if s >= 500 => SERVER_ERROR.to_string(),
            s => http_error(s),
        },
        NaverError::Network(_) => NETWORK.to_string(),
        NaverError::Malformed(detail) => malformed(detail),
        NaverError::Config(detail) => format!("{AUTH_FAILED} ({detail})"),
        NaverError::InvalidUrl(detail) => unexpected(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> NaverError {
        NaverError::HttpStatus {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn status_codes_map_to_categories() {
        assert_eq!(for_search_error(&status(401)), AUTH_FAILED);
        assert_eq!(for_search_error(&status(403)), AUTH_FAILED);
        assert_eq!(for_search_error(&status(429)), RATE_LIMITED);
        assert_eq!(for_search_error(&status(500)), SERVER_ERROR);
        assert_eq!(for_search_error(&status(503)), SERVER_ERROR);
        assert_eq!(
            for_search_error(&status(404)),
            "An error occurred during the search (HTTP 404)."
        );
    }

    #[test]
    fn transport_failures_map_to_fixed_texts() {
        assert_eq!(for_search_error(&NaverError::Timeout), TIMEOUT);
        assert_eq!(
            for_search_error(&NaverError::Network("refused".into())),
            NETWORK
        );
        let msg = for_search_error(&NaverError::Malformed("missing field `items`".into()));
        assert!(msg.starts_with("Could not process the search results:"));
        assert!(msg.contains("items"));
    }

    #[test]
    fn missing_credentials_read_as_auth_failure() {
        let msg = for_search_error(&NaverError::Config("NAVER_CLIENT_ID is not set".into()));
        assert!(msg.starts_with(AUTH_FAILED));
        assert!(msg.contains("NAVER_CLIENT_ID"));
    }
}
