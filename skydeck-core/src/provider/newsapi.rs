use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::{
    Error, Result,
    model::{Category, NewsArticle},
};

use super::NewsProvider;

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";

/// Stock image used when upstream omits an article image.
const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1504711434969-e33886168f5c?w=400&h=250&fit=crop";

/// Placeholder link used when upstream omits the article URL.
const PLACEHOLDER_URL: &str = "#";

/// Marker upstream substitutes for withdrawn content.
const REMOVED_MARKER: &str = "[Removed]";

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    api_key: String,
    http: Client,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn fetch_listing(&self, category: Category) -> Result<RawListing> {
        let res = self
            .http
            .get(EVERYTHING_URL)
            .query(&[
                ("q", category.query()),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", "20"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::Upstream {
                status: Some(status.as_u16()),
                message: upstream_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Upstream {
            status: None,
            message: format!("Failed to parse article listing JSON: {e}"),
        })
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn lookup(&self, category: Category) -> Result<Vec<NewsArticle>> {
        let listing = self.fetch_listing(category).await?;
        let now = Utc::now();

        let candidates = listing.into_candidates();
        let mut articles = Vec::with_capacity(candidates.len());

        for raw in &candidates {
            // Index is the position among survivors, so ids stay dense.
            if let Some(article) = normalize(raw, articles.len(), category, now) {
                articles.push(article);
            }
        }

        info!(%category, count = articles.len(), "news lookup complete");

        Ok(articles)
    }
}

/// Listing shapes seen across upstream provider revisions. Which one we got
/// is detected by field presence (`articles`/`url` vs `results`/`link`),
/// not by a provider flag.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawListing {
    NewsApi { articles: Vec<RawNewsApiArticle> },
    NewsData { results: Vec<RawNewsDataArticle> },
}

impl RawListing {
    fn into_candidates(self) -> Vec<RawArticle> {
        match self {
            RawListing::NewsApi { articles } => {
                articles.into_iter().map(RawArticle::NewsApi).collect()
            }
            RawListing::NewsData { results } => {
                results.into_iter().map(RawArticle::NewsData).collect()
            }
        }
    }
}

/// Shape A: `url` / `urlToImage` / `publishedAt` / `source.name`.
#[derive(Debug, Deserialize)]
struct RawNewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<DateTime<Utc>>,
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// Shape B: `link` / `image_url` / `pubDate` / `source_id`.
#[derive(Debug, Deserialize)]
struct RawNewsDataArticle {
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
    image_url: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source_id: Option<String>,
}

/// One candidate record, tagged by the shape it arrived in. The accessors
/// below give the normalization a single field vocabulary to work against.
#[derive(Debug)]
enum RawArticle {
    NewsApi(RawNewsApiArticle),
    NewsData(RawNewsDataArticle),
}

impl RawArticle {
    fn title(&self) -> Option<&str> {
        match self {
            RawArticle::NewsApi(a) => a.title.as_deref(),
            RawArticle::NewsData(a) => a.title.as_deref(),
        }
    }

    fn description(&self) -> Option<&str> {
        match self {
            RawArticle::NewsApi(a) => a.description.as_deref(),
            RawArticle::NewsData(a) => a.description.as_deref(),
        }
    }

    fn link(&self) -> Option<&str> {
        match self {
            RawArticle::NewsApi(a) => a.url.as_deref(),
            RawArticle::NewsData(a) => a.link.as_deref(),
        }
    }

    fn image(&self) -> Option<&str> {
        match self {
            RawArticle::NewsApi(a) => a.url_to_image.as_deref(),
            RawArticle::NewsData(a) => a.image_url.as_deref(),
        }
    }

    fn published_at(&self) -> Option<DateTime<Utc>> {
        match self {
            RawArticle::NewsApi(a) => a.published_at,
            RawArticle::NewsData(a) => a.pub_date.as_deref().and_then(parse_pub_date),
        }
    }

    fn source(&self) -> Option<&str> {
        match self {
            RawArticle::NewsApi(a) => a.source.as_ref().and_then(|s| s.name.as_deref()),
            RawArticle::NewsData(a) => a.source_id.as_deref(),
        }
    }
}

/// Drop placeholder records, then map survivors with the per-field fallback
/// chain: url → "#", image → stock placeholder, published → processing
/// time, source → "Unknown". Returns `None` when the candidate is filtered.
fn normalize(
    raw: &RawArticle,
    index: usize,
    category: Category,
    now: DateTime<Utc>,
) -> Option<NewsArticle> {
    let title = raw.title().filter(|t| !t.is_empty() && *t != REMOVED_MARKER)?;
    let description = raw
        .description()
        .filter(|d| !d.is_empty() && *d != REMOVED_MARKER)?;
    raw.link()?;

    let published_at = raw.published_at().unwrap_or(now);

    Some(NewsArticle {
        id: format!("{}-{}", published_at.to_rfc3339(), index),
        title: title.to_string(),
        description: description.to_string(),
        url: raw.link().unwrap_or(PLACEHOLDER_URL).to_string(),
        image_url: raw.image().unwrap_or(PLACEHOLDER_IMAGE).to_string(),
        published_at,
        source: raw.source().unwrap_or("Unknown").to_string(),
        category,
    })
}

/// Shape B timestamps come as either RFC 3339 or `YYYY-MM-DD HH:MM:SS`.
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|ndt| ndt.and_utc())
        })
}

/// Upstream error bodies carry a `message` field; fall back to the raw body.
fn upstream_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct UpstreamError {
        message: String,
    }

    serde_json::from_str::<UpstreamError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let truncated: String = body.chars().take(MAX).collect();
        format!("{truncated}...")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SHAPE_A: &str = r#"{
        "status": "ok",
        "totalResults": 3,
        "articles": [
            {"title": "Storm inbound", "description": "A storm approaches.",
             "url": "https://example.com/storm", "urlToImage": null,
             "publishedAt": "2024-03-01T10:00:00Z", "source": {"id": null, "name": "Example"}},
            {"title": "No description here", "description": null,
             "url": "https://example.com/none", "urlToImage": null,
             "publishedAt": "2024-03-01T11:00:00Z", "source": {"id": null, "name": "Example"}},
            {"title": "[Removed]", "description": "[Removed]",
             "url": "https://example.com/removed", "urlToImage": null,
             "publishedAt": null, "source": {"id": null, "name": null}}
        ]
    }"#;

    const SHAPE_B: &str = r#"{
        "status": "success",
        "results": [
            {"title": "Heatwave continues", "description": "Hot week ahead.",
             "link": "https://example.org/heat", "image_url": null,
             "pubDate": "2024-03-02 08:30:00", "source_id": "exampleorg"},
            {"title": "Link missing", "description": "Still described.",
             "image_url": null, "pubDate": null, "source_id": null}
        ]
    }"#;

    fn run_pipeline(body: &str, category: Category) -> Vec<NewsArticle> {
        let now = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
        let candidates = serde_json::from_str::<RawListing>(body)
            .expect("listing must parse")
            .into_candidates();

        let mut articles = Vec::new();
        for raw in &candidates {
            if let Some(article) = normalize(raw, articles.len(), category, now) {
                articles.push(article);
            }
        }
        articles
    }

    #[test]
    fn filters_incomplete_and_removed_articles() {
        let articles = run_pipeline(SHAPE_A, Category::Weather);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Storm inbound");
        for article in &articles {
            assert!(!article.title.is_empty());
            assert!(!article.description.is_empty());
            assert_ne!(article.title, REMOVED_MARKER);
            assert_ne!(article.description, REMOVED_MARKER);
        }
    }

    #[test]
    fn second_shape_is_detected_by_field_presence() {
        let articles = run_pipeline(SHAPE_B, Category::General);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://example.org/heat");
        assert_eq!(articles[0].source, "exampleorg");
    }

    #[test]
    fn candidates_missing_their_link_are_dropped() {
        let articles = run_pipeline(SHAPE_B, Category::General);

        assert!(articles.iter().all(|a| a.title != "Link missing"));
    }

    #[test]
    fn fallbacks_fill_missing_fields() {
        let articles = run_pipeline(SHAPE_A, Category::Weather);

        assert_eq!(articles[0].image_url, PLACEHOLDER_IMAGE);
        assert_eq!(articles[0].source, "Example");
    }

    #[test]
    fn category_comes_from_the_request_not_upstream() {
        let articles = run_pipeline(SHAPE_A, Category::Technology);

        assert!(articles.iter().all(|a| a.category == Category::Technology));
    }

    #[test]
    fn id_combines_timestamp_and_position() {
        let articles = run_pipeline(SHAPE_A, Category::Weather);

        assert_eq!(articles[0].id, "2024-03-01T10:00:00+00:00-0");
    }

    #[test]
    fn pub_date_accepts_both_formats() {
        assert!(parse_pub_date("2024-03-02 08:30:00").is_some());
        assert!(parse_pub_date("2024-03-02T08:30:00Z").is_some());
        assert!(parse_pub_date("not a date").is_none());
    }

    #[test]
    fn missing_publication_time_uses_processing_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
        let raw = RawArticle::NewsData(RawNewsDataArticle {
            title: Some("Untimed".to_string()),
            description: Some("No pubDate on this one.".to_string()),
            link: Some("https://example.org/untimed".to_string()),
            image_url: None,
            pub_date: None,
            source_id: None,
        });

        let article = normalize(&raw, 0, Category::General, now).expect("must survive");

        assert_eq!(article.published_at, now);
        assert_eq!(article.source, "Unknown");
    }

    #[test]
    fn upstream_error_message_is_extracted() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid"}"#;

        assert_eq!(upstream_message(body), "Your API key is invalid");
        assert_eq!(upstream_message("plain failure"), "plain failure");
    }

    #[test]
    fn empty_listing_is_success() {
        let articles = run_pipeline(r#"{"status": "ok", "articles": []}"#, Category::General);

        assert!(articles.is_empty());
    }
}
