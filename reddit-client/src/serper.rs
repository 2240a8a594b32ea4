use crate::metrics::{MetricsCollector, RequestMetrics};
use crate::rate_limiter::{RateLimitConfig, RateLimiter};
use crate::retry::{RetryConfig, RetryExecutor};
use ideascout_core::{CoreError, RawPost, SearchApiError};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

const UNKNOWN_SUBREDDIT: &str = "unknown";

#[derive(Debug, Clone, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub organic: Vec<OrganicResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganicResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub position: u32,
    pub date: Option<String>,
}

static PERMALINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"reddit\.com/r/(\w+)/comments/(\w+)/").expect("Invalid permalink regex")
});

/// Subreddit named in a Reddit permalink, or `"unknown"`.
pub fn subreddit_from_link(link: &str) -> String {
    PERMALINK
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_SUBREDDIT.to_string())
}

/// Keeps the organic results that point into a subreddit.
pub fn extract_reddit_posts(response: &SearchResponse) -> Vec<RawPost> {
    response
        .organic
        .iter()
        .filter(|item| item.link.contains("reddit.com/r/"))
        .map(|item| RawPost {
            title: item.title.clone(),
            snippet: item.snippet.clone(),
            url: item.link.clone(),
            subreddit: subreddit_from_link(&item.link),
            date: item.date.clone(),
            ..RawPost::default()
        })
        .collect()
}

/// Google search through serper.dev, used to find Reddit threads.
#[derive(Debug)]
pub struct SerperClient {
    http_client: Client,
    search_url: Url,
    api_key: String,
    rate_limiter: RateLimiter,
    retry: RetryExecutor,
    metrics: Arc<MetricsCollector>,
}

impl SerperClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, CoreError> {
        let search_url = Url::parse(base_url)
            .and_then(|base| base.join("search"))
            .map_err(|e| CoreError::InvalidInput {
                message: format!("invalid Serper base URL '{}': {}", base_url, e),
            })?;
        let http_client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            http_client,
            search_url,
            api_key: api_key.into(),
            rate_limiter: RateLimiter::new(RateLimitConfig::serper()),
            retry: RetryExecutor::new(RetryConfig::serper()),
            metrics: Arc::new(MetricsCollector::new()),
        })
    }

    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.retry = RetryExecutor::new(config);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    pub async fn search(&self, query: &str, num: u32) -> Result<SearchResponse, CoreError> {
        let response = self
            .retry
            .execute("serper search", || self.search_once(query, num))
            .await?;
        info!(
            "Search returned {} organic results for '{}'",
            response.organic.len(),
            query
        );
        Ok(response)
    }

    async fn search_once(&self, query: &str, num: u32) -> Result<SearchResponse, CoreError> {
        let _permit = self.rate_limiter.acquire_permit().await?;
        debug!("POST {} q={}", self.search_url, query);

        let start_time = Instant::now();
        let result = self
            .http_client
            .post(self.search_url.clone())
            .header("X-API-KEY", &self.api_key)
            .json(&SearchRequest { q: query, num })
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.record(None, start_time).await;
                warn!("Search request failed: {}", e);
                return Err(if e.is_timeout() {
                    CoreError::Search(SearchApiError::RequestTimeout)
                } else {
                    CoreError::Network(e)
                });
            }
        };

        let status = response.status();
        self.record(Some(status), start_time).await;

        if !status.is_success() {
            let error = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SearchApiError::InvalidApiKey,
                StatusCode::TOO_MANY_REQUESTS => SearchApiError::QuotaExceeded { retry_after: 60 },
                s => SearchApiError::RequestFailed {
                    status_code: s.as_u16(),
                    body: response.text().await.unwrap_or_default(),
                },
            };
            return Err(CoreError::Search(error));
        }

        response.json().await.map_err(|e| {
            CoreError::Search(SearchApiError::InvalidResponse {
                details: e.to_string(),
            })
        })
    }

    async fn record(&self, status: Option<StatusCode>, start: Instant) {
        self.metrics
            .record_request(RequestMetrics {
                endpoint: "serper:/search".to_string(),
                status_code: status.map(|s| s.as_u16()),
                response_time: start.elapsed(),
                success: status.map_or(false, |s| s.is_success()),
                rate_limited: status == Some(StatusCode::TOO_MANY_REQUESTS),
            })
            .await;
    }
}
