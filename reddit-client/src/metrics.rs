use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Per-request outcome reported by the HTTP clients.
#[derive(Debug, Clone)]
pub struct RequestMetrics {
    /// Logical endpoint, e.g. `reddit:/r/AppIdeas/hot` or `serper:/search`.
    pub endpoint: String,
    pub status_code: Option<u16>,
    pub response_time: Duration,
    pub success: bool,
    pub rate_limited: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EndpointMetrics {
    pub request_count: u64,
    pub success_count: u64,
    pub error_count: u64,
    pub total_response_time: Duration,
    pub max_response_time: Duration,
}

impl EndpointMetrics {
    fn update(&mut self, request: &RequestMetrics) {
        self.request_count += 1;
        self.total_response_time += request.response_time;
        self.max_response_time = self.max_response_time.max(request.response_time);
        if request.success {
            self.success_count += 1;
        } else {
            self.error_count += 1;
        }
    }

    pub fn average_response_time(&self) -> Duration {
        if self.request_count == 0 {
            Duration::ZERO
        } else {
            self.total_response_time / self.request_count as u32
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.request_count == 0 {
            0.0
        } else {
            self.success_count as f64 / self.request_count as f64
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiMetrics {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub rate_limited_requests: u64,
    pub requests_by_endpoint: BTreeMap<String, EndpointMetrics>,
}

#[derive(Debug, Default)]
pub struct MetricsCollector {
    metrics: RwLock<ApiMetrics>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_request(&self, request: RequestMetrics) {
        let mut metrics = self.metrics.write().await;
        metrics.total_requests += 1;
        if request.success {
            metrics.successful_requests += 1;
        } else {
            metrics.failed_requests += 1;
        }
        if request.rate_limited {
            metrics.rate_limited_requests += 1;
        }
        metrics
            .requests_by_endpoint
            .entry(request.endpoint.clone())
            .or_default()
            .update(&request);
    }

    pub async fn snapshot(&self) -> ApiMetrics {
        self.metrics.read().await.clone()
    }

    pub async fn endpoint(&self, endpoint: &str) -> Option<EndpointMetrics> {
        self.metrics.read().await.requests_by_endpoint.get(endpoint).cloned()
    }

    pub async fn log_summary(&self, label: &str) {
        let metrics = self.metrics.read().await;
        info!(
            "{}: {} requests, {} ok, {} failed, {} rate limited",
            label,
            metrics.total_requests,
            metrics.successful_requests,
            metrics.failed_requests,
            metrics.rate_limited_requests
        );
    }

    pub async fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&*self.metrics.read().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(endpoint: &str, millis: u64, success: bool) -> RequestMetrics {
        RequestMetrics {
            endpoint: endpoint.to_string(),
            status_code: Some(if success { 200 } else { 500 }),
            response_time: Duration::from_millis(millis),
            success,
            rate_limited: false,
        }
    }

    #[tokio::test]
    async fn test_counts_by_endpoint() {
        let collector = MetricsCollector::new();
        collector.record_request(request("reddit:/r/AppIdeas/hot", 100, true)).await;
        collector.record_request(request("reddit:/r/AppIdeas/hot", 300, false)).await;
        collector.record_request(request("serper:/search", 50, true)).await;

        let metrics = collector.snapshot().await;
        assert_eq!(metrics.total_requests, 3);
        assert_eq!(metrics.failed_requests, 1);

        let endpoint = collector.endpoint("reddit:/r/AppIdeas/hot").await.unwrap();
        assert_eq!(endpoint.request_count, 2);
        assert_eq!(endpoint.average_response_time(), Duration::from_millis(200));
        assert_eq!(endpoint.max_response_time, Duration::from_millis(300));
        assert_eq!(endpoint.success_rate(), 0.5);
    }

    #[tokio::test]
    async fn test_export_json() {
        let collector = MetricsCollector::new();
        collector.record_request(request("serper:/search", 10, true)).await;
        let exported = collector.export_json().await.unwrap();
        assert!(exported.contains("total_requests"));
        assert!(exported.contains("serper:/search"));
    }
}
