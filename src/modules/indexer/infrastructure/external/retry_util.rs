use crate::shared::domain::value_objects::UpstreamService;
use crate::shared::errors::{AppError, AppResult};
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry configuration for upstream calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Conservative policy used for every upstream
    pub fn conservative() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 1.5,
            jitter: true,
        }
    }

    /// No retries at all (tests, one-shot CLI runs)
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Retry utility for external API calls with exponential backoff
pub struct RetryUtil;

impl RetryUtil {
    /// Execute a function with retry logic and exponential backoff
    pub async fn with_retry<F, Fut, T>(
        operation: F,
        config: &RetryConfig,
        operation_name: &str,
    ) -> AppResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = AppResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(
                            "{} succeeded on attempt {} after {} retries",
                            operation_name,
                            attempt + 1,
                            attempt
                        );
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if !Self::is_retryable_error(&error) {
                        debug!(
                            "{} failed with non-retryable error: {}",
                            operation_name, error
                        );
                        return Err(error);
                    }

                    // Don't wait after the last attempt
                    if attempt < config.max_retries {
                        let delay = Self::calculate_delay(attempt, config);
                        warn!(
                            "{} failed on attempt {} ({}), retrying in {:?}",
                            operation_name,
                            attempt + 1,
                            error,
                            delay
                        );
                        sleep(delay).await;
                    } else {
                        warn!(
                            "{} failed on final attempt {} ({}), giving up",
                            operation_name,
                            attempt + 1,
                            error
                        );
                    }
                    last_error = Some(error);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AppError::ExternalServiceError("All retries exhausted".to_string())))
    }

    /// Calculate delay for the given attempt with exponential backoff and jitter
    fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
        let exponential_delay =
            config.base_delay.as_millis() as f64 * config.backoff_multiplier.powi(attempt as i32);

        let mut delay = Duration::from_millis(exponential_delay as u64);

        if delay > config.max_delay {
            delay = config.max_delay;
        }

        // 10% jitter against synchronized retries
        if config.jitter {
            let jitter_ms = (delay.as_millis() as f64 * 0.1 * rand::random::<f64>()) as u64;
            delay = Duration::from_millis(delay.as_millis() as u64 + jitter_ms);
        }

        delay
    }

    /// Determine if an error should trigger a retry
    fn is_retryable_error(error: &AppError) -> bool {
        match error {
            AppError::ExternalServiceError(_) | AppError::RateLimitError(_) => true,

            AppError::ApiError(msg) => {
                let msg = msg.to_lowercase();
                !msg.contains("not found")
                    && !msg.contains("unauthorized")
                    && !msg.contains("forbidden")
                    && !msg.contains("bad request")
            }

            AppError::InvalidHit(_)
            | AppError::ConfigError(_)
            | AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::NotFound(_)
            | AppError::Unauthorized(_)
            | AppError::SerializationError(_) => false,

            AppError::InternalError(_) => true,
        }
    }

    /// Retry specifically for HTTP requests with status code analysis
    pub async fn retry_http_request<F, Fut>(
        request_fn: F,
        config: &RetryConfig,
        operation_name: &str,
    ) -> AppResult<reqwest::Response>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        Self::with_retry(
            || async {
                match request_fn().await {
                    Ok(response) => {
                        let status = response.status();
                        if Self::is_retryable_status(status) {
                            Err(Self::status_to_app_error(status))
                        } else {
                            Ok(response)
                        }
                    }
                    Err(e) => Err(AppError::ExternalServiceError(format!(
                        "HTTP request failed: {}",
                        e
                    ))),
                }
            },
            config,
            operation_name,
        )
        .await
    }

    fn is_retryable_status(status: StatusCode) -> bool {
        matches!(
            status,
            StatusCode::INTERNAL_SERVER_ERROR
                | StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT
                | StatusCode::TOO_MANY_REQUESTS
                | StatusCode::REQUEST_TIMEOUT
        )
    }

    fn status_to_app_error(status: StatusCode) -> AppError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                AppError::RateLimitError("Rate limit exceeded".to_string())
            }
            _ if status.is_server_error() => {
                AppError::ExternalServiceError(format!("Server error: {}", status))
            }
            _ => AppError::ApiError(format!("HTTP error: {}", status)),
        }
    }
}

/// Common HTTP response handler for all upstreams
pub struct CommonHttpHandler;

impl CommonHttpHandler {
    /// Map HTTP status codes to errors consistently across upstreams
    pub fn handle_response_status(status: StatusCode, service: UpstreamService) -> AppResult<()> {
        match status {
            _ if status.is_success() => Ok(()),
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimitError(format!(
                "{} rate limit exceeded",
                service
            ))),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(format!(
                "{} resource not found",
                service
            ))),
            StatusCode::BAD_REQUEST => {
                Err(AppError::ApiError(format!("Bad request to {} API", service)))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized(
                format!("{} rejected the API key", service),
            )),
            _ if status.is_server_error() => Err(AppError::ExternalServiceError(format!(
                "{} service unavailable",
                service
            ))),
            _ => Err(AppError::ApiError(format!(
                "Unexpected status code from {}: {}",
                service, status
            ))),
        }
    }

    /// Create an HTTP client with consistent configuration
    pub fn create_http_client(timeout: Duration, user_agent: &str) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })
    }

    /// Execute HTTP request with retry logic
    pub async fn execute_with_retry<F, Fut>(
        request_fn: F,
        retry_config: &RetryConfig,
        service: UpstreamService,
        operation_name: &str,
    ) -> AppResult<reqwest::Response>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        RetryUtil::retry_http_request(
            request_fn,
            retry_config,
            &format!("{} {}", service, operation_name),
        )
        .await
        .and_then(|response| {
            Self::handle_response_status(response.status(), service)?;
            Ok(response)
        })
    }
}
