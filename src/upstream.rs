use bytes::Bytes;
use http::StatusCode;
use http::header::ACCEPT;
use std::time::Duration;

use crate::config::UpstreamConfig;

/// Transport-level failure, tagged before any status code exists. Consumed by
/// the translator via pattern match so nothing downstream has to inspect
/// error message strings.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream connection failed")]
    Connect,
    #[error("upstream transport error: {0}")]
    Transport(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout => "timeout",
            FetchError::Connect => "connect",
            FetchError::Transport(_) => "transport",
        }
    }
}

/// Raw upstream response: status plus the unparsed body bytes.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Client for the joke API. One GET per call, bounded by the configured
/// total-request timeout; no retries.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch `<base_url>/<path>` with the given query parameters appended.
    pub async fn fetch(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RawResponse, FetchError> {
        let url = format!("{}/{}", self.base_url, path);

        let mut request = self.client.get(&url).header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(classify)?;
        let status = response.status();
        let body = response.bytes().await.map_err(classify)?;

        tracing::debug!(%url, status = status.as_u16(), "upstream fetch");

        Ok(RawResponse { status, body })
    }
}

fn classify(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect
    } else {
        FetchError::Transport(error.to_string())
    }
}
