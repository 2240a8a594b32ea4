use crate::api::RedditPublicClient;
use crate::metrics::MetricsCollector;
use crate::serper::{extract_reddit_posts, SerperClient};
use ideascout_core::{
    CollectorConfig, ConfigError, CoreError, ErrorExt, RawPost, SourceKind, SERPER_API_KEY_ENV,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

enum Source {
    Reddit {
        client: RedditPublicClient,
        subreddits: Vec<String>,
    },
    Serper {
        client: SerperClient,
        queries: Vec<String>,
        results_per_query: u32,
    },
}

/// Gathers a batch of posts from the configured source.
pub struct Collector {
    source: Source,
    delay: Duration,
    metrics: Arc<MetricsCollector>,
}

impl Collector {
    pub fn from_config(config: &CollectorConfig) -> Result<Self, CoreError> {
        let metrics = Arc::new(MetricsCollector::new());
        let source = match config.source {
            SourceKind::Reddit => Source::Reddit {
                client: RedditPublicClient::new(&config.reddit_base_url, &config.user_agent)?
                    .with_metrics(metrics.clone()),
                subreddits: config.subreddits.clone(),
            },
            SourceKind::Serper => {
                let api_key = config.serper_api_key.clone().ok_or_else(|| {
                    ConfigError::MissingEnvironmentVariable {
                        var_name: SERPER_API_KEY_ENV.to_string(),
                    }
                })?;
                Source::Serper {
                    client: SerperClient::new(&config.serper_base_url, api_key)?
                        .with_metrics(metrics.clone()),
                    queries: config.queries.clone(),
                    results_per_query: config.results_per_query,
                }
            }
        };

        Ok(Self {
            source,
            delay: Duration::from_millis(config.request_delay_ms),
            metrics,
        })
    }

    pub fn reddit(client: RedditPublicClient, subreddits: Vec<String>, delay: Duration) -> Self {
        let metrics = client.metrics().clone();
        Self {
            source: Source::Reddit { client, subreddits },
            delay,
            metrics,
        }
    }

    pub fn serper(
        client: SerperClient,
        queries: Vec<String>,
        results_per_query: u32,
        delay: Duration,
    ) -> Self {
        let metrics = client.metrics().clone();
        Self {
            source: Source::Serper {
                client,
                queries,
                results_per_query,
            },
            delay,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    /// Collects up to `target` unique posts.
    ///
    /// A failing subreddit or query is logged and skipped. The call only
    /// fails when nothing was collected and at least one source failed.
    pub async fn collect(&self, target: usize) -> Result<Vec<RawPost>, CoreError> {
        info!("Collecting up to {} posts", target);
        let result = match &self.source {
            Source::Reddit { client, subreddits } => {
                self.collect_reddit(client, subreddits, target).await
            }
            Source::Serper {
                client,
                queries,
                results_per_query,
            } => {
                self.collect_serper(client, queries, *results_per_query, target)
                    .await
            }
        };
        self.metrics.log_summary("Collection requests").await;

        let (posts, last_error) = result;
        match last_error {
            Some(error) if posts.is_empty() => Err(error),
            _ => {
                info!("Collected {} posts", posts.len());
                Ok(posts)
            }
        }
    }

    async fn collect_reddit(
        &self,
        client: &RedditPublicClient,
        subreddits: &[String],
        target: usize,
    ) -> (Vec<RawPost>, Option<CoreError>) {
        if subreddits.is_empty() {
            return (Vec::new(), None);
        }
        let per_subreddit = target.div_ceil(subreddits.len()) + 2;
        let mut all_posts = Vec::new();
        let mut last_error = None;

        for (i, subreddit) in subreddits.iter().enumerate() {
            match client.fetch_hot(subreddit, per_subreddit as u32).await {
                Ok(posts) => all_posts.extend(posts),
                Err(error) => {
                    warn!("Skipping r/{}: {}", subreddit, error.user_friendly_message());
                    last_error = Some(error);
                }
            }
            if i + 1 < subreddits.len() {
                sleep(self.delay).await;
            }
        }

        let mut posts = dedupe_by_url(all_posts);
        posts.sort_by(|a, b| b.score.cmp(&a.score));
        posts.truncate(target);
        (posts, last_error)
    }

    async fn collect_serper(
        &self,
        client: &SerperClient,
        queries: &[String],
        results_per_query: u32,
        target: usize,
    ) -> (Vec<RawPost>, Option<CoreError>) {
        let mut all_posts = Vec::new();
        let mut last_error = None;

        for (i, query) in queries.iter().enumerate() {
            match client.search(query, results_per_query).await {
                Ok(response) => {
                    let posts = extract_reddit_posts(&response);
                    info!("Query '{}' yielded {} Reddit posts", query, posts.len());
                    all_posts.extend(posts);
                }
                Err(error) => {
                    warn!("Skipping query '{}': {}", query, error.user_friendly_message());
                    last_error = Some(error);
                }
            }
            if all_posts.len() >= target {
                break;
            }
            if i + 1 < queries.len() {
                sleep(self.delay).await;
            }
        }

        let mut posts = dedupe_by_url(all_posts);
        posts.truncate(target);
        (posts, last_error)
    }
}

/// Removes repeated URLs. A repeated post keeps its first position but takes
/// the data of its last occurrence.
pub fn dedupe_by_url(posts: Vec<RawPost>) -> Vec<RawPost> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<RawPost> = Vec::with_capacity(posts.len());
    for post in posts {
        match index.get(&post.url) {
            Some(&i) => unique[i] = post,
            None => {
                index.insert(post.url.clone(), unique.len());
                unique.push(post);
            }
        }
    }
    unique
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub count: usize,
    pub average_score: f64,
    pub average_comments: f64,
    /// Posts per subreddit.
    pub subreddits: BTreeMap<String, usize>,
}

impl CollectionStats {
    pub fn from_posts(posts: &[RawPost]) -> Self {
        let count = posts.len();
        let mut subreddits = BTreeMap::new();
        for post in posts {
            *subreddits.entry(post.subreddit.clone()).or_insert(0) += 1;
        }
        let (average_score, average_comments) = if count == 0 {
            (0.0, 0.0)
        } else {
            let score: i64 = posts.iter().map(|p| p.score).sum();
            let comments: u64 = posts.iter().map(|p| p.num_comments).sum();
            (score as f64 / count as f64, comments as f64 / count as f64)
        };

        Self {
            count,
            average_score,
            average_comments,
            subreddits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(url: &str, score: i64, subreddit: &str) -> RawPost {
        RawPost {
            url: url.to_string(),
            score,
            subreddit: subreddit.to_string(),
            ..RawPost::new(url, "")
        }
    }

    #[test]
    fn test_dedupe_keeps_first_position_last_value() {
        let posts = vec![
            post("a", 1, "x"),
            post("b", 2, "x"),
            post("a", 9, "y"),
        ];
        let unique = dedupe_by_url(posts);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].url, "a");
        assert_eq!(unique[0].score, 9);
        assert_eq!(unique[1].url, "b");
    }

    #[test]
    fn test_collection_stats() {
        let mut posts = vec![post("a", 10, "AppIdeas"), post("b", 30, "AppIdeas"), post("c", 20, "startups")];
        posts[0].num_comments = 4;
        let stats = CollectionStats::from_posts(&posts);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.average_score, 20.0);
        assert!((stats.average_comments - 4.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.subreddits.get("AppIdeas"), Some(&2));
    }

    #[test]
    fn test_empty_stats() {
        let stats = CollectionStats::from_posts(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average_score, 0.0);
    }

    #[test]
    fn test_serper_source_requires_key() {
        let config = CollectorConfig {
            source: SourceKind::Serper,
            serper_api_key: None,
            ..CollectorConfig::default()
        };
        assert!(matches!(
            Collector::from_config(&config),
            Err(CoreError::Config(_))
        ));
    }
}
