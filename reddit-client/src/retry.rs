use ideascout_core::{CoreError, LlmError, RedditApiError, SearchApiError};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, the first one included
    pub max_attempts: u32,
    /// Base delay for exponential backoff (in milliseconds)
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds)
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    /// Maximum jitter factor (0.0 to 1.0)
    pub jitter_factor: f64,
    /// Consecutive failed operations before the circuit opens
    pub failure_threshold: u32,
    /// Seconds the circuit stays open before a trial request
    pub recovery_timeout_s: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
            failure_threshold: 5,
            recovery_timeout_s: 60,
        }
    }
}

impl RetryConfig {
    /// Public listing endpoints answer 429 quickly; back off harder.
    pub fn reddit() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 2000,
            max_delay_ms: 60000,
            backoff_multiplier: 2.0,
            jitter_factor: 0.2,
            failure_threshold: 4,
            recovery_timeout_s: 120,
        }
    }

    pub fn serper() -> Self {
        Self {
            max_attempts: 2,
            base_delay_ms: 1500,
            max_delay_ms: 15000,
            backoff_multiplier: 2.0,
            jitter_factor: 0.2,
            failure_threshold: 3,
            recovery_timeout_s: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitBreakerState {
    Closed,
    Open,
    HalfOpen,
}

/// Stops calling a source after repeated failed operations.
#[derive(Debug)]
pub struct CircuitBreaker {
    state: CircuitBreakerState,
    failure_count: u32,
    last_failure_time: Option<Instant>,
    failure_threshold: u32,
    recovery_timeout: Duration,
}

impl CircuitBreaker {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            state: CircuitBreakerState::Closed,
            failure_count: 0,
            last_failure_time: None,
            failure_threshold: config.failure_threshold.max(1),
            recovery_timeout: Duration::from_secs(config.recovery_timeout_s),
        }
    }

    pub fn allow_request(&mut self) -> bool {
        match self.state {
            CircuitBreakerState::Closed | CircuitBreakerState::HalfOpen => true,
            CircuitBreakerState::Open => match self.last_failure_time {
                Some(last_failure) if last_failure.elapsed() >= self.recovery_timeout => {
                    debug!("Circuit breaker half-open, letting a trial request through");
                    self.state = CircuitBreakerState::HalfOpen;
                    true
                }
                _ => false,
            },
        }
    }

    pub fn record_success(&mut self) {
        if self.state == CircuitBreakerState::HalfOpen {
            info!("Circuit breaker closed again after a successful trial request");
        }
        self.state = CircuitBreakerState::Closed;
        self.failure_count = 0;
        self.last_failure_time = None;
    }

    pub fn record_failure(&mut self) {
        self.failure_count += 1;
        self.last_failure_time = Some(Instant::now());

        match self.state {
            CircuitBreakerState::Closed if self.failure_count >= self.failure_threshold => {
                warn!(
                    "Circuit breaker opening after {} consecutive failures",
                    self.failure_count
                );
                self.state = CircuitBreakerState::Open;
            }
            CircuitBreakerState::HalfOpen => {
                warn!("Trial request failed, circuit breaker open again");
                self.state = CircuitBreakerState::Open;
            }
            _ => {}
        }
    }

    pub fn state(&self) -> CircuitBreakerState {
        self.state
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetryStrategy {
    /// Exponential backoff with jitter
    Retry,
    /// Wait exactly as long as the server asked
    RetryWithDelay(Duration),
    NoRetry,
}

pub fn get_retry_strategy(error: &CoreError) -> RetryStrategy {
    match error {
        CoreError::RedditApi(reddit_error) => match reddit_error {
            RedditApiError::RateLimitExceeded { retry_after } => {
                RetryStrategy::RetryWithDelay(Duration::from_secs(*retry_after))
            }
            RedditApiError::ServerError { status_code } if *status_code >= 500 => {
                RetryStrategy::Retry
            }
            RedditApiError::RequestTimeout => RetryStrategy::Retry,
            RedditApiError::InvalidResponse { .. } => RetryStrategy::Retry,
            _ => RetryStrategy::NoRetry,
        },
        CoreError::Search(search_error) => match search_error {
            SearchApiError::QuotaExceeded { retry_after } => {
                RetryStrategy::RetryWithDelay(Duration::from_secs(*retry_after))
            }
            SearchApiError::RequestFailed { status_code, .. } if *status_code >= 500 => {
                RetryStrategy::Retry
            }
            SearchApiError::RequestTimeout => RetryStrategy::Retry,
            _ => RetryStrategy::NoRetry,
        },
        CoreError::Llm(llm_error) => match llm_error {
            LlmError::RateLimitExceeded { retry_after, .. } => {
                RetryStrategy::RetryWithDelay(Duration::from_secs(*retry_after))
            }
            LlmError::ServiceUnavailable { .. } | LlmError::RequestTimeout { .. } => {
                RetryStrategy::Retry
            }
            _ => RetryStrategy::NoRetry,
        },
        CoreError::Network(reqwest_error) => {
            if reqwest_error.is_timeout() || reqwest_error.is_connect() {
                RetryStrategy::Retry
            } else {
                RetryStrategy::NoRetry
            }
        }
        CoreError::RateLimited {
            retry_after: Some(delay),
            ..
        } => RetryStrategy::RetryWithDelay(*delay),
        CoreError::RateLimited { .. } | CoreError::Timeout { .. } => RetryStrategy::Retry,
        _ => RetryStrategy::NoRetry,
    }
}

/// Exponential backoff plus up to `jitter_factor` of random extra delay,
/// capped at `max_delay_ms`.
pub fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let max_delay = Duration::from_millis(config.max_delay_ms);
    let multiplier = config.backoff_multiplier.powi(attempt as i32);
    let delay_ms = ((config.base_delay_ms as f64 * multiplier) as u64).min(config.max_delay_ms);
    let exponential_delay = Duration::from_millis(delay_ms);

    let jitter_range = (delay_ms as f64 * config.jitter_factor) as u64;
    let jitter = fastrand::u64(0..=jitter_range);

    (exponential_delay + Duration::from_millis(jitter)).min(max_delay)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetryMetrics {
    pub total_retries: u64,
    pub successful_retries: u64,
    pub failed_operations: u64,
    pub circuit_breaker_trips: u64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs an operation with retries, backoff and a circuit breaker.
#[derive(Debug)]
pub struct RetryExecutor {
    config: RetryConfig,
    circuit_breaker: Mutex<CircuitBreaker>,
    metrics: Mutex<RetryMetrics>,
}

impl RetryExecutor {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            circuit_breaker: Mutex::new(CircuitBreaker::new(&config)),
            metrics: Mutex::new(RetryMetrics::default()),
            config,
        }
    }

    /// Returns the operation's value, or the error of its last attempt.
    pub async fn execute<F, Fut, T>(&self, operation_name: &str, operation: F) -> Result<T, CoreError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        if !lock(&self.circuit_breaker).allow_request() {
            lock(&self.metrics).circuit_breaker_trips += 1;
            warn!("Circuit breaker is open, skipping {}", operation_name);
            return Err(CoreError::Internal {
                message: format!("Circuit breaker is open for {}", operation_name),
            });
        }

        let max_attempts = self.config.max_attempts.max(1);
        let mut total_delay = Duration::ZERO;
        let mut attempt = 0;

        let last_error = loop {
            match operation().await {
                Ok(result) => {
                    lock(&self.circuit_breaker).record_success();
                    if attempt > 0 {
                        lock(&self.metrics).successful_retries += 1;
                        info!(
                            "{} succeeded after {} retries ({:?} waiting)",
                            operation_name, attempt, total_delay
                        );
                    }
                    return Ok(result);
                }
                Err(error) => {
                    let attempts_left = attempt + 1 < max_attempts;
                    let delay = match get_retry_strategy(&error) {
                        RetryStrategy::Retry if attempts_left => calculate_delay(attempt, &self.config),
                        RetryStrategy::RetryWithDelay(delay) if attempts_left => delay,
                        _ => break error,
                    };

                    info!("Retrying {} in {:?} after: {}", operation_name, delay, error);
                    total_delay += delay;
                    sleep(delay).await;
                    attempt += 1;
                    lock(&self.metrics).total_retries += 1;
                }
            }
        };

        lock(&self.circuit_breaker).record_failure();
        lock(&self.metrics).failed_operations += 1;
        error!(
            "{} failed after {} attempts: {}",
            operation_name,
            attempt + 1,
            last_error
        );
        Err(last_error)
    }

    pub fn metrics(&self) -> RetryMetrics {
        lock(&self.metrics).clone()
    }

    pub fn circuit_breaker_state(&self) -> CircuitBreakerState {
        lock(&self.circuit_breaker).state()
    }
}
