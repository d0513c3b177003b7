use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone)]
struct StubState {
    responses: Arc<HashMap<String, (StatusCode, String)>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

/// In-process stand-in for the joke API: serves canned status/body pairs
/// keyed by path and records every request it sees. The serve task is
/// aborted on drop.
pub struct StubUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<(String, String)>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubUpstream {
    pub async fn start(responses: Vec<(&str, StatusCode, &str)>) -> Self {
        let responses: HashMap<String, (StatusCode, String)> = responses
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body.to_string())))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = StubState {
            responses: Arc::new(responses),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(stub_handler).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
            handle,
        }
    }

    /// Number of requests observed for a path.
    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }

    /// Raw query strings observed for a path, in arrival order.
    pub fn queries(&self, path: &str) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
            .collect()
    }

    /// Paths of all observed requests, in arrival order.
    pub fn request_order(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }
}

impl Drop for StubUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn stub_handler(State(state): State<StubState>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    let query = uri.query().unwrap_or("").to_string();
    state.requests.lock().unwrap().push((path.clone(), query));

    match state.responses.get(&path) {
        Some((status, body)) => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
