use crate::metrics::{MetricsCollector, RequestMetrics};
use crate::rate_limiter::{RateLimitConfig, RateLimiter};
use crate::retry::{RetryConfig, RetryExecutor};
use chrono::{TimeZone, Utc};
use ideascout_core::{CoreError, RawPost, RedditApiError};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub author: String,
    pub subreddit: String,
    pub permalink: String,
    pub created_utc: f64,
    pub score: i64,
    pub num_comments: u64,
}

impl From<RedditPostData> for RawPost {
    fn from(data: RedditPostData) -> Self {
        RawPost {
            title: data.title,
            snippet: data.selftext,
            url: format!("https://reddit.com{}", data.permalink),
            subreddit: data.subreddit,
            score: data.score,
            num_comments: data.num_comments,
            created_at: Some(data.created_utc)
                .filter(|secs| *secs > 0.0)
                .and_then(|secs| Utc.timestamp_opt(secs as i64, 0).single()),
            author: Some(data.author).filter(|a| !a.is_empty()),
            date: None,
        }
    }
}

/// Client for the unauthenticated `hot.json` listings.
#[derive(Debug)]
pub struct RedditPublicClient {
    http_client: Client,
    base_url: Url,
    rate_limiter: RateLimiter,
    retry: RetryExecutor,
    metrics: Arc<MetricsCollector>,
}

impl RedditPublicClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url).map_err(|e| CoreError::InvalidInput {
            message: format!("invalid Reddit base URL '{}': {}", base_url, e),
        })?;
        let http_client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            rate_limiter: RateLimiter::new(RateLimitConfig::reddit_public()),
            retry: RetryExecutor::new(RetryConfig::reddit()),
            metrics: Arc::new(MetricsCollector::new()),
        })
    }

    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.retry = RetryExecutor::new(config);
        self
    }

    pub fn with_rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limiter = RateLimiter::new(config);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    fn listing_url(&self, subreddit: &str, limit: u32) -> Result<Url, CoreError> {
        let mut url = self
            .base_url
            .join(&format!("r/{}/hot.json", subreddit))
            .map_err(|e| CoreError::InvalidInput {
                message: format!("invalid subreddit '{}': {}", subreddit, e),
            })?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// Hot posts of one subreddit in listing order. Stickied posts are kept.
    pub async fn fetch_hot(&self, subreddit: &str, limit: u32) -> Result<Vec<RawPost>, CoreError> {
        let operation = format!("r/{} hot", subreddit);
        let listing = self
            .retry
            .execute(&operation, || self.fetch_listing_once(subreddit, limit))
            .await?;

        let posts: Vec<RawPost> = listing
            .data
            .children
            .into_iter()
            .map(|child| RawPost::from(child.data))
            .collect();

        info!("Retrieved {} posts from r/{}", posts.len(), subreddit);
        Ok(posts)
    }

    async fn fetch_listing_once(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<RedditListing<RedditPostData>, CoreError> {
        let url = self.listing_url(subreddit, limit)?;
        let _permit = self.rate_limiter.acquire_permit().await?;
        debug!("GET {}", url);

        let start_time = Instant::now();
        let result = self.http_client.get(url).send().await;
        let endpoint = format!("reddit:/r/{}/hot", subreddit);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.record(&endpoint, None, start_time, false).await;
                warn!("Network error for r/{}: {}", subreddit, e);
                return Err(if e.is_timeout() {
                    CoreError::RedditApi(RedditApiError::RequestTimeout)
                } else {
                    CoreError::Network(e)
                });
            }
        };

        let status = response.status();
        let checked = check_status(response, subreddit);
        self.record(&endpoint, Some(status), start_time, checked.is_ok())
            .await;

        checked?.json().await.map_err(|e| {
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("failed to parse listing for r/{}: {}", subreddit, e),
            })
        })
    }

    async fn record(&self, endpoint: &str, status: Option<StatusCode>, start: Instant, success: bool) {
        self.metrics
            .record_request(RequestMetrics {
                endpoint: endpoint.to_string(),
                status_code: status.map(|s| s.as_u16()),
                response_time: start.elapsed(),
                success,
                rate_limited: status == Some(StatusCode::TOO_MANY_REQUESTS),
            })
            .await;
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn check_status(response: Response, subreddit: &str) -> Result<Response, CoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error = match status {
        StatusCode::TOO_MANY_REQUESTS => RedditApiError::RateLimitExceeded {
            retry_after: retry_after_secs(&response),
        },
        StatusCode::FORBIDDEN => RedditApiError::Forbidden {
            resource: format!("r/{}", subreddit),
        },
        StatusCode::NOT_FOUND => RedditApiError::SubredditNotFound {
            subreddit: subreddit.to_string(),
        },
        s if s.is_server_error() => RedditApiError::ServerError {
            status_code: s.as_u16(),
        },
        s => RedditApiError::InvalidResponse {
            details: format!("unexpected status {} for r/{}", s, subreddit),
        },
    };
    Err(CoreError::RedditApi(error))
}
