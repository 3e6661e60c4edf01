use std::sync::Arc;

use reqwest::StatusCode;

use crate::app::{RadiationError, Result};
use crate::fetcher::{HttpRequest, HttpResponse, Transport};

/// Attempts per request, including the first one.
pub const MAX_ATTEMPTS: u32 = 5;

/// Wraps a [`Transport`] with a fixed-ceiling retry policy.
///
/// GET succeeds only on `200 OK`; PUT only on `204 No Content` with an empty
/// body. Every other outcome, including transport errors, is retried
/// immediately until the ceiling is reached.
#[derive(Clone)]
pub struct RetryingClient {
    transport: Arc<dyn Transport + Send + Sync>,
    max_attempts: u32,
}

impl RetryingClient {
    pub fn new(transport: Arc<dyn Transport + Send + Sync>) -> Self {
        Self::with_max_attempts(transport, MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(transport: Arc<dyn Transport + Send + Sync>, max_attempts: u32) -> Self {
        Self {
            transport,
            max_attempts: max_attempts.max(1),
        }
    }

    pub async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.send(HttpRequest::get(url), StatusCode::OK).await
    }

    pub async fn put(&self, url: &str, body: Vec<u8>, content_type: &'static str) -> Result<Vec<u8>> {
        self.send(HttpRequest::put(url, body, content_type), StatusCode::NO_CONTENT)
            .await
    }

    async fn send(&self, request: HttpRequest, expected: StatusCode) -> Result<Vec<u8>> {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match self.attempt(&request, expected).await {
                Ok(body) => {
                    if attempt > 1 {
                        tracing::debug!("{} {} succeeded on attempt {}", request.method, request.url, attempt);
                    }
                    return Ok(body);
                }
                Err(e) if e.is_retryable() => {
                    tracing::warn!(
                        "{} {} failed (attempt {}/{}): {}",
                        request.method,
                        request.url,
                        attempt,
                        self.max_attempts,
                        e
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        let source = last_error
            .unwrap_or_else(|| RadiationError::Other("no attempt was made".into()));
        Err(RadiationError::RemoteUnavailable {
            attempts: self.max_attempts,
            source: Box::new(source),
        })
    }

    async fn attempt(&self, request: &HttpRequest, expected: StatusCode) -> Result<Vec<u8>> {
        let HttpResponse { status, body } = self.transport.execute(request).await?;

        // A 204 that carries a body is not the answer we asked for
        let empty_required = expected == StatusCode::NO_CONTENT;
        if status != expected || (empty_required && !body.is_empty()) {
            return Err(RadiationError::UnexpectedStatus {
                status: status.as_u16(),
                url: request.url.clone(),
            });
        }

        Ok(body)
    }
}
