//! Ingestion: Reddit listings and Serper search results turned into
//! [`RawPost`](ideascout_core::RawPost) batches.

pub mod api;
pub mod collector;
pub mod metrics;
pub mod rate_limiter;
pub mod retry;
pub mod serper;

#[cfg(test)]
mod tests;

pub use api::{RedditListing, RedditPostData, RedditPublicClient};
pub use collector::{dedupe_by_url, CollectionStats, Collector};
pub use metrics::{ApiMetrics, MetricsCollector, RequestMetrics};
pub use rate_limiter::{RateLimitConfig, RateLimiter};
pub use retry::{CircuitBreakerState, RetryConfig, RetryExecutor};
pub use serper::{extract_reddit_posts, SearchResponse, SerperClient};
