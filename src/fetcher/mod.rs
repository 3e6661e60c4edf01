pub mod http_fetcher;
pub mod retry;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use crate::app::Result;

pub use http_fetcher::HttpTransport;
pub use retry::{RetryingClient, MAX_ATTEMPTS};

/// One request as handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Request body and its content type
    pub body: Option<(Vec<u8>, &'static str)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
        }
    }

    pub fn put(url: impl Into<String>, body: Vec<u8>, content_type: &'static str) -> Self {
        Self {
            method: Method::PUT,
            url: url.into(),
            body: Some((body, content_type)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Performs a single authenticated round trip: build, send, read the body.
///
/// Implementations do not interpret the status code; that is the retrying
/// client's job.
#[async_trait]
pub trait Transport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}
