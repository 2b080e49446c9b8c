//! In-process mock backend for integration tests
//!
//! Serves the five endpoints of the backend contract over a real TCP port
//! with an in-memory store and a bearer-token check, so the HTTP client is
//! exercised end to end.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub const USERNAME: &str = "testuser";
pub const PASSWORD: &str = "1234";
pub const TOKEN: &str = "integration-test-token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Clone)]
struct MockState {
    tasks: Arc<Mutex<Vec<TaskRecord>>>,
    next_id: Arc<AtomicI64>,
}

pub struct MockBackendServer {
    pub base_url: String,
    tasks: Arc<Mutex<Vec<TaskRecord>>>,
    handle: JoinHandle<()>,
}

impl MockBackendServer {
    pub async fn start() -> Self {
        let tasks = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            tasks: Arc::clone(&tasks),
            next_id: Arc::new(AtomicI64::new(1)),
        };

        let app = Router::new()
            .route("/api/v1/token/", post(issue_token))
            .route("/api/v1/tasks/", get(list_tasks).post(create_task))
            .route(
                "/api/v1/tasks/{id}/",
                patch(update_task).delete(delete_task),
            )
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("local listener should bind");
        let addr = listener.local_addr().expect("listener address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend serve");
        });

        Self {
            base_url: format!("http://{addr}/api/v1"),
            tasks,
            handle,
        }
    }

    pub async fn task_count(&self) -> usize {
        self.tasks.lock().await.len()
    }

    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for MockBackendServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

type RouteError = (StatusCode, Json<Value>);

fn authorized(headers: &HeaderMap) -> Result<(), RouteError> {
    let valid = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));

    if valid {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid token."})),
        ))
    }
}

#[derive(Debug, Deserialize)]
struct TokenRequest {
    username: String,
    password: String,
}

async fn issue_token(Json(req): Json<TokenRequest>) -> Result<Json<Value>, RouteError> {
    if req.username == USERNAME && req.password == PASSWORD {
        Ok(Json(json!({"access": TOKEN})))
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        ))
    }
}

async fn list_tasks(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TaskRecord>>, RouteError> {
    authorized(&headers)?;
    Ok(Json(state.tasks.lock().await.clone()))
}

#[derive(Debug, Deserialize)]
struct CreateRequest {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    completed: bool,
}

async fn create_task(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<TaskRecord>), RouteError> {
    authorized(&headers)?;

    if req.title.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"title": ["This field may not be blank."]})),
        ));
    }

    let record = TaskRecord {
        id: state.next_id.fetch_add(1, Ordering::SeqCst),
        title: req.title,
        description: req.description,
        completed: req.completed,
    };
    state.tasks.lock().await.push(record.clone());

    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize)]
struct CompletionPatch {
    completed: bool,
}

async fn update_task(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(patch): Json<CompletionPatch>,
) -> Result<Json<TaskRecord>, RouteError> {
    authorized(&headers)?;

    let mut tasks = state.tasks.lock().await;
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            task.completed = patch.completed;
            Ok(Json(task.clone()))
        }
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Not found."})),
        )),
    }
}

async fn delete_task(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, RouteError> {
    authorized(&headers)?;

    let mut tasks = state.tasks.lock().await;
    let before = tasks.len();
    tasks.retain(|t| t.id != id);

    if tasks.len() == before {
        Err((
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Not found."})),
        ))
    } else {
        Ok(StatusCode::NO_CONTENT)
    }
}
