// src/news.rs
use crate::error::FetchError;
use crate::models::{Article, EverythingResponse};
use chrono::{Duration, Utc};
use log::{debug, error};
use reqwest::Client;
use std::env;

/// The Magnificent Seven, in fetch order.
pub const MAGNIFICENT_SEVEN: [&str; 7] = [
    "Apple",
    "Microsoft",
    "Alphabet",
    "Amazon",
    "NVIDIA",
    "Meta",
    "Tesla",
];

/// Cap on the number of articles in the final feed.
pub const MAX_FEED_ITEMS: usize = 50;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// Provider configuration, injected into the aggregator so tests can point
/// it at a mock server or withhold the credential without touching the
/// process environment.
#[derive(Clone, Debug)]
pub struct NewsConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl NewsConfig {
    pub fn new(api_key: Option<String>) -> Self {
        NewsConfig {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Reads `NEWS_API_KEY` once. A missing variable is not an error; it
    /// just means every provider call will be rejected and the feed stays
    /// empty.
    pub fn from_env() -> Self {
        NewsConfig::new(env::var("NEWS_API_KEY").ok())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

async fn fetch_company_news(
    client: &Client,
    config: &NewsConfig,
    company: &str,
) -> Result<Vec<Article>, FetchError> {
    let to = Utc::now().date_naive();
    let from = to - Duration::days(7);

    let url = format!("{}/everything", config.base_url);
    let mut request = client.get(&url).query(&[
        ("q", format!("{} stock", company)),
        ("language", "en".to_string()),
        ("from", from.format("%Y-%m-%d").to_string()),
        ("to", to.format("%Y-%m-%d").to_string()),
        ("sortBy", "publishedAt".to_string()),
    ]);
    if let Some(api_key) = &config.api_key {
        request = request.header("X-Api-Key", api_key);
    }

    let response = request.send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let body = response.json::<EverythingResponse>().await?;
    let mut articles = body.articles;
    for article in &mut articles {
        article.company = company.to_string();
    }
    Ok(articles)
}

/// Fetches the last week of "<company> stock" news for each of the seven
/// companies, one sequential call per company. A failed call is logged and
/// contributes zero articles; this function itself never fails. The combined
/// result is sorted by publication time, newest first, and capped at
/// [`MAX_FEED_ITEMS`].
pub async fn fetch_aggregated_news(client: &Client, config: &NewsConfig) -> Vec<Article> {
    let mut all_news = Vec::new();

    for company in MAGNIFICENT_SEVEN {
        match fetch_company_news(client, config, company).await {
            Ok(mut articles) => {
                debug!("Fetched {} articles for {}", articles.len(), company);
                all_news.append(&mut articles);
            }
            Err(e) => {
                error!("Error fetching news for {}: {}", company, e);
            }
        }
    }

    build_feed(all_news)
}

/// Sorts newest-first (stable, so equal timestamps keep fetch order) and
/// truncates to the feed cap.
pub fn build_feed(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles.truncate(MAX_FEED_ITEMS);
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleSource;
    use chrono::TimeZone;

    fn article(company: &str, title: &str, hour: u32) -> Article {
        Article {
            company: company.to_string(),
            source: ArticleSource {
                id: None,
                name: Some("Example Wire".to_string()),
            },
            author: None,
            title: Some(title.to_string()),
            description: None,
            url: None,
            url_to_image: None,
            published_at: Utc.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap(),
            content: None,
        }
    }

    #[test]
    fn feed_is_sorted_newest_first() {
        let feed = build_feed(vec![
            article("Apple", "a", 3),
            article("Tesla", "b", 9),
            article("Meta", "c", 6),
        ]);
        let hours: Vec<u32> = feed
            .iter()
            .map(|a| {
                use chrono::Timelike;
                a.published_at.hour()
            })
            .collect();
        assert_eq!(hours, vec![9, 6, 3]);
    }

    #[test]
    fn feed_is_capped_at_fifty() {
        let articles: Vec<Article> = (0..120)
            .map(|i| article("Amazon", &format!("item {}", i), (i % 24) as u32))
            .collect();
        let feed = build_feed(articles);
        assert_eq!(feed.len(), MAX_FEED_ITEMS);
    }

    #[test]
    fn equal_timestamps_keep_fetch_order() {
        let feed = build_feed(vec![
            article("Apple", "first", 12),
            article("Microsoft", "second", 12),
            article("Alphabet", "third", 12),
        ]);
        let titles: Vec<&str> = feed.iter().map(|a| a.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_input_gives_empty_feed() {
        assert!(build_feed(Vec::new()).is_empty());
    }
}
