#![cfg(test)]
//! In-process stand-in for the backend: same routes, status codes and
//! plain-text error bodies, with users kept in memory.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;

use common::types::{CreateUserRequest, LoginRequest, RegisterRequest, UpdateUserRequest, User};

/// Password the stub accepts for every account.
pub const STUB_PASSWORD: &str = "pw";

#[derive(Default)]
pub struct BackendState {
    users: Mutex<Vec<User>>,
    next_id: AtomicU64,
    fail_list: AtomicBool,
    envelope_auth: AtomicBool,
    last_authorization: Mutex<Option<String>>,
}

pub struct StubBackend {
    pub base_url: String,
    state: Arc<BackendState>,
}

impl StubBackend {
    pub fn seed(&self, user: User) {
        self.state.users.lock().unwrap().push(user);
    }

    pub fn users(&self) -> Vec<User> {
        self.state.users.lock().unwrap().clone()
    }

    /// Make `GET /api/users` answer 500 until switched back.
    pub fn fail_list(&self, fail: bool) {
        self.state.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Wrap login answers in the `{data, error, message}` envelope, with
    /// rejections sent as 200.
    pub fn envelope_auth(&self, on: bool) {
        self.state.envelope_auth.store(on, Ordering::SeqCst);
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }
}

pub fn sample_user(id: &str, email: &str) -> User {
    let now = Utc::now();
    User {
        id: id.to_string(),
        email: email.to_string(),
        username: format!("user{id}"),
        first_name: "Test".into(),
        last_name: "User".into(),
        created_at: now,
        updated_at: now,
    }
}

pub async fn spawn_backend() -> anyhow::Result<StubBackend> {
    let state = Arc::new(BackendState { next_id: AtomicU64::new(1), ..Default::default() });
    let router = Router::new()
        .route("/", get(health))
        .route("/api/users", get(list_users))
        .route("/api/users/get", get(get_user))
        .route("/api/users/create", post(create_user))
        .route("/api/users/update", put(update_user))
        .route("/api/users/delete", delete(delete_user))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/enveloped", get(enveloped))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(StubBackend { base_url: format!("http://{addr}"), state })
}

type Shared = State<Arc<BackendState>>;
type IdQuery = Query<HashMap<String, String>>;

fn plain(status: StatusCode, msg: &str) -> Response {
    (status, format!("{msg}\n")).into_response()
}

fn required_id(q: &HashMap<String, String>) -> Result<String, Response> {
    q.get("id")
        .filter(|id| !id.is_empty())
        .cloned()
        .ok_or_else(|| plain(StatusCode::BAD_REQUEST, "User ID is required"))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"message": "Sanctor API is running", "status": "healthy"}))
}

async fn list_users(State(st): Shared, headers: HeaderMap) -> Response {
    let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).map(str::to_string);
    *st.last_authorization.lock().unwrap() = auth;
    if st.fail_list.load(Ordering::SeqCst) {
        return plain(StatusCode::INTERNAL_SERVER_ERROR, "database offline");
    }
    Json(st.users.lock().unwrap().clone()).into_response()
}

async fn get_user(State(st): Shared, Query(q): IdQuery) -> Response {
    let id = match required_id(&q) { Ok(id) => id, Err(resp) => return resp };
    match st.users.lock().unwrap().iter().find(|u| u.id == id) {
        Some(u) => Json(u.clone()).into_response(),
        None => plain(StatusCode::NOT_FOUND, "user not found"),
    }
}

async fn create_user(State(st): Shared, Json(req): Json<CreateUserRequest>) -> Response {
    let mut users = st.users.lock().unwrap();
    if users.iter().any(|u| u.email == req.email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "user with this email already exists", "message": "create failed"})),
        )
            .into_response();
    }
    let now = Utc::now();
    let user = User {
        id: st.next_id.fetch_add(1, Ordering::SeqCst).to_string(),
        email: req.email,
        username: req.username,
        first_name: req.first_name,
        last_name: req.last_name,
        created_at: now,
        updated_at: now,
    };
    users.push(user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn update_user(State(st): Shared, Query(q): IdQuery, Json(patch): Json<UpdateUserRequest>) -> Response {
    let id = match required_id(&q) { Ok(id) => id, Err(resp) => return resp };
    let mut users = st.users.lock().unwrap();
    let Some(user) = users.iter_mut().find(|u| u.id == id) else {
        return plain(StatusCode::NOT_FOUND, "user not found");
    };
    if let Some(v) = patch.email { user.email = v; }
    if let Some(v) = patch.username { user.username = v; }
    if let Some(v) = patch.first_name { user.first_name = v; }
    if let Some(v) = patch.last_name { user.last_name = v; }
    user.updated_at = Utc::now();
    Json(user.clone()).into_response()
}

async fn delete_user(State(st): Shared, Query(q): IdQuery) -> Response {
    let id = match required_id(&q) { Ok(id) => id, Err(resp) => return resp };
    let mut users = st.users.lock().unwrap();
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        return plain(StatusCode::NOT_FOUND, "user not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn login(State(st): Shared, Json(req): Json<LoginRequest>) -> Response {
    if st.envelope_auth.load(Ordering::SeqCst) {
        if req.password != STUB_PASSWORD {
            return Json(json!({"error": "invalid credentials", "message": "login failed"})).into_response();
        }
        return Json(json!({"data": {"token": "abc"}, "message": "ok"})).into_response();
    }
    if req.password != STUB_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid credentials", "message": "login failed"})),
        )
            .into_response();
    }
    Json(json!({"token": "abc", "refreshToken": "refresh-abc", "expiresAt": "2030-01-01T00:00:00Z"})).into_response()
}

async fn register(Json(req): Json<RegisterRequest>) -> Response {
    if req.email.is_empty() {
        return plain(StatusCode::BAD_REQUEST, "email and username are required");
    }
    // no session issued for this address, mirroring a backend that only acknowledges
    if req.email.starts_with("pending") {
        return Json(json!({"message": "registration pending"})).into_response();
    }
    Json(json!({"token": format!("reg-{}", req.username)})).into_response()
}

async fn enveloped(Query(q): IdQuery) -> Response {
    if q.contains_key("fail") {
        return Json(json!({"error": "quota exceeded", "message": "rejected"})).into_response();
    }
    let n: u32 = q.get("n").and_then(|n| n.parse().ok()).unwrap_or_default();
    Json(json!({"data": n, "message": "ok"})).into_response()
}
