use bytes::Bytes;
use http::StatusCode;
use serde_json::Value;

use crate::errors::ApiError;
use crate::upstream::{FetchError, RawResponse};

/// Which proxied route a response belongs to. Drives the per-endpoint 503
/// wording and the success-shape check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Categories,
    Joke,
    Search,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Categories => "categories",
            Endpoint::Joke => "joke",
            Endpoint::Search => "search",
        }
    }

    fn unavailable_message(self) -> &'static str {
        match self {
            Endpoint::Categories => "Unable to fetch categories",
            Endpoint::Joke => "Unable to fetch joke",
            Endpoint::Search => "Unable to fetch search results",
        }
    }
}

/// Map an upstream fetch outcome to either a passthrough JSON value or an
/// `ApiError`. A malformed or partial upstream payload never reaches the
/// caller; it becomes a 503.
pub fn translate(
    endpoint: Endpoint,
    fetched: Result<RawResponse, FetchError>,
) -> Result<Value, ApiError> {
    let response = match fetched {
        Ok(response) => response,
        Err(FetchError::Timeout) => {
            return Err(ApiError::Unavailable("Upstream request timeout".into()));
        }
        Err(FetchError::Connect) => {
            return Err(ApiError::Unavailable("Upstream connection failed".into()));
        }
        Err(FetchError::Transport(_)) => {
            return Err(ApiError::Unavailable(
                "Service temporarily unavailable".into(),
            ));
        }
    };

    match response.status {
        StatusCode::OK => {}
        StatusCode::TOO_MANY_REQUESTS => {
            return Err(ApiError::RateLimited(upstream_error_message(
                &response.body,
                "Rate limit exceeded",
            )));
        }
        StatusCode::NOT_FOUND => {
            return Err(ApiError::NotFound(upstream_error_message(
                &response.body,
                "Not found",
            )));
        }
        // 5xx and anything else unexpected collapse to the per-endpoint 503.
        _ => return Err(ApiError::Unavailable(endpoint.unavailable_message().into())),
    }

    let Ok(value) = serde_json::from_slice::<Value>(&response.body) else {
        return Err(ApiError::Unavailable("Invalid response from upstream".into()));
    };

    if !has_expected_shape(endpoint, &value) {
        return Err(ApiError::Unavailable("Invalid response format".into()));
    }

    Ok(value)
}

/// Pull the `error` message out of an upstream 404/429 body so it can be
/// passed through unchanged. Anything unusable falls back to a fixed message
/// rather than leaking raw upstream bytes.
fn upstream_error_message(body: &Bytes, fallback: &str) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| fallback.to_string())
}

fn has_expected_shape(endpoint: Endpoint, value: &Value) -> bool {
    match endpoint {
        Endpoint::Categories => value
            .as_array()
            .is_some_and(|categories| categories.iter().all(Value::is_string)),
        Endpoint::Joke => ["id", "url", "value"].iter().all(|field| {
            value
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty())
        }),
        Endpoint::Search => {
            value.get("total").and_then(Value::as_i64).is_some()
                && value.get("result").is_some_and(Value::is_array)
        }
    }
}
