use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;
use tokio::net::TcpListener;

use crate::config::{CategoryValidation, Listener};
use crate::errors::ApiError;
use crate::metrics_defs::{REQUEST_DURATION, REQUESTS, UPSTREAM_FAILURES};
use crate::translate::{Endpoint, translate};
use crate::upstream::UpstreamClient;
use crate::validate;

#[derive(Clone)]
pub struct AppState {
    pub client: UpstreamClient,
    pub category_validation: CategoryValidation,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiServeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(categories))
        .route("/joke/{category}", get(joke))
        .route("/search", get(search))
        .route("/health", get(health))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

pub async fn serve(listener: &Listener, state: AppState) -> Result<(), ApiServeError> {
    let addr = format!("{}:{}", listener.host, listener.port);
    let tcp = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "gateway listening");

    axum::serve(tcp, router(state)).await?;
    Ok(())
}

async fn categories(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    proxy_request(&state, Endpoint::Categories, "categories", &[]).await
}

async fn joke(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Value>, ApiError> {
    validate::validate_category(&category)?;

    if state.category_validation == CategoryValidation::Strict {
        ensure_known_category(&state, &category).await?;
    }

    proxy_request(&state, Endpoint::Joke, "random", &[("category", category.as_str())]).await
}

#[derive(Deserialize)]
struct SearchParams {
    query: Option<String>,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let term = validate::validate_query(params.query.as_deref())?;

    proxy_request(&state, Endpoint::Search, "search", &[("query", term.as_str())]).await
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// One upstream fetch plus translation, with request metrics recorded around
/// it. Validation rejections never reach this point.
async fn proxy_request(
    state: &AppState,
    endpoint: Endpoint,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Json<Value>, ApiError> {
    let started = Instant::now();

    let fetched = state.client.fetch(path, query).await;
    if let Err(err) = &fetched {
        tracing::warn!(endpoint = endpoint.name(), error = %err, "upstream fetch failed");
        metrics::counter!(
            UPSTREAM_FAILURES.name,
            "endpoint" => endpoint.name(),
            "kind" => err.kind()
        )
        .increment(1);
    }

    let result = translate(endpoint, fetched);

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(err) => err.status(),
    };
    metrics::counter!(
        REQUESTS.name,
        "endpoint" => endpoint.name(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION.name, "endpoint" => endpoint.name())
        .record(started.elapsed().as_secs_f64());

    result.map(Json)
}

/// Strict mode: the category must appear (case-insensitively) in the live
/// category list before the joke call is made.
async fn ensure_known_category(state: &AppState, category: &str) -> Result<(), ApiError> {
    let fetched = state.client.fetch("categories", &[]).await;
    let list = translate(Endpoint::Categories, fetched)?;

    let known = list
        .as_array()
        .is_some_and(|categories| {
            categories
                .iter()
                .filter_map(Value::as_str)
                .any(|c| c.eq_ignore_ascii_case(category))
        });

    if known {
        Ok(())
    } else {
        tracing::warn!(category, "rejected unknown category");
        Err(ApiError::InvalidCategory(format!(
            "Invalid category: {category}. See /categories for the list of valid categories."
        )))
    }
}
