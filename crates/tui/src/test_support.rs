//! In-process stand-in for the sheet endpoint.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::CACHE_CONTROL},
    routing::get,
};
use serde_json::Value;

type Reply = (StatusCode, String);

struct StubState {
    get_reply: Mutex<Reply>,
    post_reply: Mutex<Reply>,
    gets: AtomicUsize,
    posted: Mutex<Vec<Value>>,
    cache_headers: Mutex<Vec<String>>,
}

pub struct StubEndpoint {
    pub url: String,
    state: Arc<StubState>,
}

pub struct StubBuilder {
    get_reply: Reply,
    post_reply: Reply,
}

impl StubEndpoint {
    pub fn builder() -> StubBuilder {
        StubBuilder {
            get_reply: (StatusCode::OK, "[]".to_string()),
            post_reply: (StatusCode::OK, r#"{"ok":true}"#.to_string()),
        }
    }

    pub fn gets(&self) -> usize {
        self.state.gets.load(Ordering::SeqCst)
    }

    pub fn posted(&self) -> Vec<Value> {
        self.state.posted.lock().unwrap().clone()
    }

    pub fn cache_headers(&self) -> Vec<String> {
        self.state.cache_headers.lock().unwrap().clone()
    }

    pub fn set_get_reply(&self, status: StatusCode, body: impl Into<String>) {
        *self.state.get_reply.lock().unwrap() = (status, body.into());
    }
}

impl StubBuilder {
    pub fn get_reply(mut self, status: StatusCode, body: impl Into<String>) -> Self {
        self.get_reply = (status, body.into());
        self
    }

    pub fn post_reply(mut self, status: StatusCode, body: impl Into<String>) -> Self {
        self.post_reply = (status, body.into());
        self
    }

    pub async fn spawn(self) -> StubEndpoint {
        let state = Arc::new(StubState {
            get_reply: Mutex::new(self.get_reply),
            post_reply: Mutex::new(self.post_reply),
            gets: AtomicUsize::new(0),
            posted: Mutex::new(Vec::new()),
            cache_headers: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/exec", get(on_get).post(on_post))
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubEndpoint {
            url: format!("http://{addr}/exec"),
            state,
        }
    }
}

fn record_cache_header(state: &StubState, headers: &HeaderMap) {
    if let Some(value) = headers.get(CACHE_CONTROL).and_then(|v| v.to_str().ok()) {
        state.cache_headers.lock().unwrap().push(value.to_string());
    }
}

async fn on_get(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Reply {
    state.gets.fetch_add(1, Ordering::SeqCst);
    record_cache_header(&state, &headers);
    state.get_reply.lock().unwrap().clone()
}

async fn on_post(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    body: String,
) -> Reply {
    record_cache_header(&state, &headers);
    let value = serde_json::from_str(&body).unwrap_or(Value::String(body));
    state.posted.lock().unwrap().push(value);
    state.post_reply.lock().unwrap().clone()
}
