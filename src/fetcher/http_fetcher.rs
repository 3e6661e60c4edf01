use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;

use crate::app::{RadiationError, Result};
use crate::fetcher::{HttpRequest, HttpResponse, Transport};

/// Header carrying the API token on every request.
pub const AUTH_HEADER: &str = "x-auth-token";

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(token: &str, timeout: Duration) -> Result<Self> {
        let mut token_value = HeaderValue::from_str(token)
            .map_err(|_| RadiationError::Other("API token contains invalid characters".into()))?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(AUTH_HEADER), token_value);

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("radiation/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.request(request.method.clone(), &request.url);

        if let Some((body, content_type)) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, *content_type)
                .body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
