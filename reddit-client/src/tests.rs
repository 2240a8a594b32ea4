#[cfg(test)]
mod tests {
    use crate::{Collector, RateLimitConfig, RedditPublicClient, RetryConfig, SerperClient};
    use ideascout_core::{CoreError, RedditApiError, SearchApiError};
    use serde_json::{json, Value};
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_ms: 5,
            jitter_factor: 0.0,
            ..RetryConfig::default()
        }
    }

    fn fast_limits() -> RateLimitConfig {
        RateLimitConfig {
            max_requests: 1000,
            time_window: Duration::from_secs(1),
            burst_allowance: 10,
        }
    }

    fn reddit_client(server: &MockServer) -> RedditPublicClient {
        RedditPublicClient::new(&server.uri(), "ideascout-test/0.1")
            .unwrap()
            .with_retry_config(fast_retry())
            .with_rate_limit(fast_limits())
    }

    fn listing(posts: &[(&str, &str, i64, bool)]) -> Value {
        let children: Vec<Value> = posts
            .iter()
            .map(|(id, title, score, stickied)| {
                json!({
                    "kind": "t3",
                    "data": {
                        "id": id,
                        "title": title,
                        "selftext": format!("body of {}", title),
                        "author": "someone",
                        "subreddit": "AppIdeas",
                        "permalink": format!("/r/AppIdeas/comments/{}/post/", id),
                        "created_utc": 1_700_000_000.0,
                        "score": score,
                        "num_comments": 3,
                        "stickied": stickied
                    }
                })
            })
            .collect();
        json!({"kind": "Listing", "data": {"children": children, "after": null, "before": null}})
    }

    #[tokio::test]
    async fn test_fetch_hot_maps_posts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/AppIdeas/hot.json"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[
                ("rules", "Read the rules", 1, true),
                ("a1", "Need an app for chores", 12, false),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let posts = tokio_test::assert_ok!(reddit_client(&server).fetch_hot("AppIdeas", 5).await);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Read the rules");
        assert_eq!(posts[1].title, "Need an app for chores");
        assert_eq!(posts[1].snippet, "body of Need an app for chores");
        assert_eq!(posts[1].url, "https://reddit.com/r/AppIdeas/comments/a1/post/");
        assert_eq!(posts[1].score, 12);
    }

    #[tokio::test]
    async fn test_missing_subreddit_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/NoSuchPlace/hot.json"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = reddit_client(&server)
            .fetch_hot("NoSuchPlace", 5)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::RedditApi(RedditApiError::SubredditNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/AppIdeas/hot.json"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/r/AppIdeas/hot.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(listing(&[("b2", "Second try", 5, false)])),
            )
            .expect(1)
            .with_priority(2)
            .mount(&server)
            .await;

        let client = reddit_client(&server);
        let posts = client.fetch_hot("AppIdeas", 5).await.unwrap();
        assert_eq!(posts.len(), 1);

        let metrics = client.metrics().snapshot().await;
        assert_eq!(metrics.total_requests, 2);
        assert_eq!(metrics.failed_requests, 1);
    }

    #[tokio::test]
    async fn test_serper_search_sends_key_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("X-API-KEY", "secret"))
            .and(body_partial_json(json!({"q": "site:reddit.com/r/AppIdeas", "num": 10})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic": [
                    {"title": "Idea thread", "link": "https://www.reddit.com/r/AppIdeas/comments/q1/idea/", "snippet": "an idea", "position": 1},
                    {"title": "Elsewhere", "link": "https://example.com/post", "position": 2}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SerperClient::new(&server.uri(), "secret")
            .unwrap()
            .with_retry_config(fast_retry());
        let response = client.search("site:reddit.com/r/AppIdeas", 10).await.unwrap();
        let posts = crate::extract_reddit_posts(&response);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].subreddit, "AppIdeas");
        assert_eq!(posts[0].snippet, "an idea");
    }

    #[tokio::test]
    async fn test_serper_rejects_bad_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = SerperClient::new(&server.uri(), "wrong")
            .unwrap()
            .with_retry_config(fast_retry());
        let err = client.search("anything", 10).await.unwrap_err();
        assert!(matches!(err, CoreError::Search(SearchApiError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_reddit_collection_skips_failures_and_ranks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/AppIdeas/hot.json"))
            .and(query_param("limit", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[
                ("low", "Low", 1, false),
                ("high", "High", 50, false),
                ("mid", "Mid", 20, false),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/r/Private/hot.json"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let collector = Collector::reddit(
            reddit_client(&server),
            vec!["AppIdeas".to_string(), "Private".to_string()],
            Duration::ZERO,
        );
        // ceil(2 / 2) + 2 = 3 per subreddit
        let posts = collector.collect(2).await.unwrap();
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["High", "Mid"]);
    }

    #[tokio::test]
    async fn test_reddit_collection_fails_when_every_source_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let collector = Collector::reddit(
            reddit_client(&server),
            vec!["A".to_string(), "B".to_string()],
            Duration::ZERO,
        );
        assert!(collector.collect(5).await.is_err());
    }

    #[tokio::test]
    async fn test_serper_collection_stops_at_target() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_partial_json(json!({"q": "first"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic": [
                    {"title": "One", "link": "https://www.reddit.com/r/AppIdeas/comments/1/one/"},
                    {"title": "Two", "link": "https://www.reddit.com/r/AppIdeas/comments/2/two/"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_partial_json(json!({"q": "second"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"organic": []})))
            .expect(0)
            .mount(&server)
            .await;

        let client = SerperClient::new(&server.uri(), "secret")
            .unwrap()
            .with_retry_config(fast_retry());
        let collector = Collector::serper(
            client,
            vec!["first".to_string(), "second".to_string()],
            10,
            Duration::ZERO,
        );
        let posts = collector.collect(2).await.unwrap();
        assert_eq!(posts.len(), 2);
    }
}
