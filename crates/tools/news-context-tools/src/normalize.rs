//! Turns raw search items into display-ready [`NewsItem`]s.

use chrono::DateTime;
use naver_news_async::types::RawNewsItem;
use tracing::warn;
use url::Url;

pub const NO_TITLE: &str = "(no title)";
pub const NO_LINK: &str = "#";
pub const NO_DATE: &str = "(no date)";
pub const UNKNOWN_PUBLISHER: &str = "Unknown publisher";

/// Host of the aggregator's own article pages
pub const AGGREGATOR_HOST: &str = "news.naver.com";

/// Lowercase markers that precede a publisher name in aggregator snippets
const SOURCE_MARKERS: [&str; 2] = ["출처 : ", "source: "];

const UPSTREAM_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";
const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One search result, cleaned for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub publisher: String,
    /// `YYYY-MM-DD HH:MM` in the timestamp's own offset, or the raw value
    pub published_at: String,
    /// Extracted article text, or an inline failure message
    pub body: Option<String>,
}

impl NewsItem {
    #[must_use]
    pub fn from_raw(raw: &RawNewsItem) -> Self {
        let title = raw
            .title
            .as_deref()
            .map(strip_markup)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());
        let link = raw
            .link
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(NO_LINK)
            .to_string();
        let published_at = raw
            .pub_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map_or_else(|| NO_DATE.to_string(), format_date);

        Self {
            title,
            link,
            publisher: extract_publisher(raw),
            published_at,
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// Removes the API's `<b>` highlight tags and decodes common entities.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    text.replace("<b>", "")
        .replace("</b>", "")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Best-effort publisher name.
///
/// Tries, in order: the tail of a `"Headline - Publisher"` title, the source
/// marker in an aggregator-hosted item's description, the link's host without
/// `www.`, and finally [`UNKNOWN_PUBLISHER`].
#[must_use]
pub fn extract_publisher(raw: &RawNewsItem) -> String {
    if let Some((_, tail)) = raw.title.as_deref().and_then(|t| t.rsplit_once(" - ")) {
        let publisher = strip_markup(tail);
        let publisher = publisher.trim();
        if !publisher.is_empty() {
            return publisher.to_string();
        }
    }

    let Some(host) = raw.link.as_deref().and_then(link_host) else {
        return UNKNOWN_PUBLISHER.to_string();
    };

    if host_matches(&host, AGGREGATOR_HOST)
        && let Some(source) = raw.description.as_deref().and_then(source_from_description)
    {
        return source;
    }

    let domain = host.strip_prefix("www.").unwrap_or(&host);
    if domain.is_empty() {
        UNKNOWN_PUBLISHER.to_string()
    } else {
        domain.to_string()
    }
}

/// Reformats an RFC 2822 style timestamp as `YYYY-MM-DD HH:MM`.
///
/// The timestamp keeps its own offset. Input that does not parse is returned
/// unchanged.
#[must_use]
pub fn format_date(raw: &str) -> String {
    match DateTime::parse_from_str(raw.trim(), UPSTREAM_DATE_FORMAT) {
        Ok(dt) => dt.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(e) => {
            warn!(raw, error = %e, "Could not reformat publication date");
            raw.to_string()
        }
    }
}

/// True when `host` is `domain` or one of its subdomains.
#[must_use]
pub fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn link_host(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    url.host_str().map(str::to_ascii_lowercase)
}

fn source_from_description(description: &str) -> Option<String> {
    let plain = strip_markup(description);
    // ASCII folding keeps byte offsets aligned with `plain`.
    let folded = plain.to_ascii_lowercase();
    SOURCE_MARKERS.iter().find_map(|marker| {
        let start = folded.find(marker)? + marker.len();
        let end = folded[start..]
            .find(marker)
            .map_or(plain.len(), |i| start + i);
        let source = plain[start..end].trim();
        (!source.is_empty()).then(|| source.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, link: &str, description: &str) -> RawNewsItem {
        RawNewsItem {
            title: Some(title.into()),
            link: Some(link.into()),
            description: Some(description.into()),
            ..RawNewsItem::default()
        }
    }

    #[test]
    fn strip_markup_removes_highlights_and_entities() {
        assert_eq!(
            strip_markup("<b>AI</b> &quot;boom&quot; &amp; bust"),
            "AI \"boom\" & bust"
        );
        assert_eq!(strip_markup("a &lt;b&gt; &#39;c&#39; &apos;d&apos;"), "a <b> 'c' 'd'");
        assert_eq!(strip_markup("plain text"), "plain text");
    }

    #[test]
    fn strip_markup_does_not_double_decode() {
        assert_eq!(strip_markup("&amp;quot;"), "&quot;");
    }

    #[test]
    fn publisher_from_title_suffix() {
        let item = raw(
            "<b>반도체</b> 수출 증가 - 연합뉴스",
            "https://n.news.naver.com/article/1",
            "",
        );
        assert_eq!(extract_publisher(&item), "연합뉴스");
    }

    #[test]
    fn publisher_from_aggregator_source_marker() {
        let item = raw(
            "Exports rise",
            "https://n.news.naver.com/mnews/article/001/1",
            "Exports climbed again. 출처 : 한국경제",
        );
        assert_eq!(extract_publisher(&item), "한국경제");

        let item = raw(
            "Exports rise",
            "https://news.naver.com/main/read.naver?oid=1",
            "Exports climbed again. Source: Herald",
        );
        assert_eq!(extract_publisher(&item), "Herald");
    }

    #[test]
    fn publisher_from_host_without_www() {
        let item = raw("Chip exports rise", "https://www.koreaherald.com/view.php?ud=1", "");
        assert_eq!(extract_publisher(&item), "koreaherald.com");
    }

    #[test]
    fn aggregator_without_marker_falls_back_to_host() {
        let item = raw("Exports rise", "https://n.news.naver.com/article/1", "No marker here");
        assert_eq!(extract_publisher(&item), "n.news.naver.com");
    }

    #[test]
    fn publisher_unknown_when_link_unusable() {
        let item = raw("Headline", "not a url", "");
        assert_eq!(extract_publisher(&item), UNKNOWN_PUBLISHER);
        assert_eq!(extract_publisher(&RawNewsItem::default()), UNKNOWN_PUBLISHER);
    }

    #[test]
    fn host_matching_respects_label_boundaries() {
        assert!(host_matches("news.naver.com", "news.naver.com"));
        assert!(host_matches("n.news.naver.com", "news.naver.com"));
        assert!(!host_matches("fakenews.naver.com", "news.naver.com"));
    }

    #[test]
    fn format_date_keeps_original_offset() {
        assert_eq!(format_date("Mon, 05 May 2025 10:30:00 +0900"), "2025-05-05 10:30");
        assert_eq!(format_date("Sun, 04 May 2025 23:59:59 +0000"), "2025-05-04 23:59");
    }

    #[test]
    fn format_date_passes_through_unparseable_input() {
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date("2025-05-05 10:30"), "2025-05-05 10:30");
    }

    #[test]
    fn from_raw_fills_defaults() {
        let item = NewsItem::from_raw(&RawNewsItem::default());
        assert_eq!(item.title, NO_TITLE);
        assert_eq!(item.link, NO_LINK);
        assert_eq!(item.published_at, NO_DATE);
        assert_eq!(item.publisher, UNKNOWN_PUBLISHER);
        assert!(item.body.is_none());
    }

    #[test]
    fn from_raw_cleans_fields() {
        let item = NewsItem::from_raw(&RawNewsItem {
            title: Some("<b>AI</b> rally &amp; more - Herald".into()),
            link: Some("https://www.koreaherald.com/a".into()),
            pub_date: Some("Mon, 05 May 2025 08:00:00 +0900".into()),
            ..RawNewsItem::default()
        });
        assert_eq!(item.title, "AI rally & more - Herald");
        assert_eq!(item.publisher, "Herald");
        assert_eq!(item.published_at, "2025-05-05 08:00");
        assert_eq!(item.link, "https://www.koreaherald.com/a");
    }
}
