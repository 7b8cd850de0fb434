// Shared mock backend and fakes for the SDK integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use url::Url;

use mindlink_client::domain::ports::{Clock, Notifier, SessionObserver};

// Fixed time source so expiry assertions are deterministic.
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_epoch_millis(&self) -> u64 {
        self.0
    }
}

// Notifier fake that records every surfaced message.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub errors: Arc<Mutex<Vec<String>>>,
    pub successes: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.lock().expect("errors mutex poisoned").clone()
    }

    pub fn success_messages(&self) -> Vec<String> {
        self.successes
            .lock()
            .expect("successes mutex poisoned")
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        let mut guard = self.errors.lock().expect("errors mutex poisoned");
        guard.push(message.to_string());
    }

    fn success(&self, message: &str) {
        let mut guard = self.successes.lock().expect("successes mutex poisoned");
        guard.push(message.to_string());
    }
}

// Observer fake that counts session-expired signals.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub expired: Arc<AtomicUsize>,
}

impl RecordingObserver {
    pub fn expired_count(&self) -> usize {
        self.expired.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionObserver for RecordingObserver {
    async fn session_expired(&self) {
        self.expired.fetch_add(1, Ordering::SeqCst);
    }
}

// What the mock backend observed, for assertions on outbound decoration.
#[derive(Clone, Default)]
pub struct Recorded {
    pub auth_headers: Arc<Mutex<Vec<Option<String>>>>,
}

impl Recorded {
    fn push_auth(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let mut guard = self
            .auth_headers
            .lock()
            .expect("auth headers mutex poisoned");
        guard.push(value);
    }

    pub fn last_auth_header(&self) -> Option<Option<String>> {
        let guard = self
            .auth_headers
            .lock()
            .expect("auth headers mutex poisoned");
        guard.last().cloned()
    }
}

// Spawn the mock MindLink API on an ephemeral port and return its base URL.
pub async fn spawn_mock_api() -> (Url, Recorded) {
    mindlink_client::frameworks::config::load_env();
    mindlink_client::frameworks::telemetry::init();
    let recorded = Recorded::default();
    let app = mock_app(recorded.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server failed");
    });
    let base_url = Url::parse(&format!("http://{addr}")).expect("mock base url parses");
    (base_url, recorded)
}

fn mock_app(recorded: Recorded) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(me))
        .route("/auth/profile", put(update_profile))
        .route("/auth/account", delete(delete_account))
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/search", get(search_notes))
        .route("/notes/tags/all", get(all_tags))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/notes/{id}/tags", post(update_tags))
        .route("/notes/{id}/versions", get(list_versions))
        .route("/notes/{id}/versions/{n}", get(get_version))
        .route("/notes/{id}/versions/{n}/restore", post(restore_version))
        .route("/files", get(list_files))
        .route("/files/public", get(list_public_files))
        .route(
            "/files/{id}",
            get(file_detail).put(update_file).delete(delete_file),
        )
        .route("/files/upload", post(upload_file))
        .route("/files/download/{id}", get(download_file))
        .route("/health", get(health))
        .with_state(recorded)
}

fn user_json(username: &str) -> Value {
    json!({
        "id": 1,
        "username": username,
        "email": format!("{username}@example.com"),
        "is_active": true,
        "is_superuser": false,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": null
    })
}

fn note_json(id: i64, title: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "note body",
        "summary": null,
        "tags": tags,
        "user_id": 1,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": null
    })
}

fn file_json(id: i64, filename: &str, is_public: bool) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "filename": filename,
        "file_size": 14,
        "file_type": "text/plain",
        "description": null,
        "is_public": is_public,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": null,
        "download_url": format!("/files/download/{id}")
    })
}

fn version_json(note_id: i64, version_number: i64) -> Value {
    json!({
        "id": version_number * 100,
        "note_id": note_id,
        "title": format!("revision {version_number}"),
        "content": "older body",
        "summary": null,
        "tags": ["work"],
        "version_number": version_number,
        "change_description": "edited body",
        "created_at": "2024-01-01T00:00:00Z"
    })
}

fn envelope(code: i64, message: &str, data: Value) -> Json<Value> {
    Json(json!({"code": code, "message": message, "data": data}))
}

// Account endpoints reject anything but the token the mock login issued.
fn require_session(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    if auth == Some("bearer abc") {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "not authenticated"})),
        ))
    }
}

async fn register(Json(body): Json<Value>) -> Json<Value> {
    let username = body["username"].as_str().unwrap_or_default();
    if username == "taken" {
        return envelope(400, "username already registered", Value::Null);
    }
    envelope(
        201,
        "account created",
        json!({"user": user_json(username), "message": "please log in"}),
    )
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if password != "secret123" {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": 401, "message": "invalid username or password"})),
        ));
    }
    Ok(envelope(
        200,
        "login ok",
        json!({
            "user": user_json(username),
            "tokens": {
                "access_token": "abc",
                "token_type": "bearer",
                "expires_in": 3600
            }
        }),
    ))
}

async fn refresh(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if params.get("refresh_token").map(String::as_str) == Some("good-refresh") {
        return envelope(
            200,
            "token refreshed",
            json!({"access_token": "abc2", "token_type": "bearer"}),
        );
    }
    envelope(401, "invalid refresh token", Value::Null)
}

async fn me(headers: HeaderMap) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_session(&headers)?;
    Ok(envelope(200, "current user", user_json("alice")))
}

async fn update_profile(
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_session(&headers)?;
    let username = body["username"].as_str().unwrap_or("alice");
    Ok(envelope(200, "profile updated", user_json(username)))
}

async fn delete_account(headers: HeaderMap) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_session(&headers)?;
    Ok(envelope(
        200,
        "account deleted",
        json!({"message": "account deleted"}),
    ))
}

// A stale bearer token simulates the expired-session path; anything else,
// including no token at all, gets a normal page back.
async fn list_notes(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    recorded.push_auth(&headers);
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    if auth == Some("bearer stale") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "token expired"})),
        ));
    }
    Ok(envelope(
        200,
        "notes listed",
        json!({
            "items": [note_json(1, "first", &["work"]), note_json(2, "second", &[])],
            "pagination": {"page": 1, "size": 20, "total": 2, "pages": 1}
        }),
    ))
}

async fn create_note(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.push_auth(&headers);
    let title = body["title"].as_str().unwrap_or_default();
    if title == "reject" {
        return envelope(400, "title already exists", Value::Null);
    }
    let tags: Vec<&str> = body["tags"]
        .as_array()
        .map(|values| values.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    envelope(200, "note created", note_json(10, title, &tags))
}

// Status-by-id lets tests drive each HTTP failure branch.
async fn get_note(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    recorded.push_auth(&headers);
    match id {
        403 => Err((
            StatusCode::FORBIDDEN,
            Json(json!({"message": "forbidden"})),
        )),
        404 => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"message": "note not found"})),
        )),
        418 => Err((
            StatusCode::IM_A_TEAPOT,
            Json(json!({"message": "cannot brew notes"})),
        )),
        500 => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "boom"})),
        )),
        _ => Ok(envelope(200, "note fetched", note_json(id, "fetched", &[]))),
    }
}

async fn update_note(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.push_auth(&headers);
    let title = body["title"].as_str().unwrap_or("updated");
    envelope(200, "note updated", note_json(id, title, &[]))
}

async fn delete_note(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(_id): Path<i64>,
) -> Json<Value> {
    recorded.push_auth(&headers);
    envelope(200, "note deleted", Value::Null)
}

async fn update_tags(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.push_auth(&headers);
    let tags: Vec<&str> = body["tags"]
        .as_array()
        .map(|values| values.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    envelope(200, "tags updated", note_json(id, "tagged", &tags))
}

async fn search_notes(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorded.push_auth(&headers);
    let keyword = params.get("q").cloned().unwrap_or_default();
    envelope(
        200,
        "search complete",
        json!({
            "query": keyword,
            "tags": null,
            "total_results": 1,
            "results": [note_json(7, "match", &["work"])]
        }),
    )
}

async fn all_tags(State(recorded): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    recorded.push_auth(&headers);
    envelope(200, "tags listed", json!(["work", "ideas"]))
}

async fn list_versions(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Json<Value> {
    recorded.push_auth(&headers);
    envelope(
        200,
        "versions listed",
        json!([version_json(id, 2), version_json(id, 1)]),
    )
}

async fn get_version(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path((id, n)): Path<(i64, i64)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    recorded.push_auth(&headers);
    if n > 9 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({"message": "version not found"})),
        ));
    }
    Ok(envelope(200, "version fetched", version_json(id, n)))
}

async fn restore_version(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path((id, n)): Path<(i64, i64)>,
) -> Json<Value> {
    recorded.push_auth(&headers);
    let title = format!("revision {n}");
    envelope(200, "version restored", note_json(id, &title, &["work"]))
}

async fn list_files(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
) -> Json<Value> {
    recorded.push_auth(&headers);
    envelope(
        200,
        "files listed",
        json!({
            "items": [file_json(1, "notes.txt", false), file_json(2, "plan.txt", true)],
            "pagination": {"page": 1, "size": 20, "total": 2, "pages": 1}
        }),
    )
}

async fn list_public_files(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
) -> Json<Value> {
    recorded.push_auth(&headers);
    envelope(
        200,
        "public files listed",
        json!({
            "items": [file_json(2, "plan.txt", true)],
            "pagination": {"page": 1, "size": 20, "total": 1, "pages": 1}
        }),
    )
}

async fn file_detail(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    recorded.push_auth(&headers);
    if id == 404 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({"message": "file not found"})),
        ));
    }
    Ok(envelope(200, "file fetched", file_json(id, "notes.txt", false)))
}

async fn update_file(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.push_auth(&headers);
    let is_public = body["is_public"].as_bool().unwrap_or(false);
    envelope(200, "file updated", file_json(id, "notes.txt", is_public))
}

async fn delete_file(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(_id): Path<i64>,
) -> Json<Value> {
    recorded.push_auth(&headers);
    envelope(200, "file deleted", Value::Null)
}

async fn upload_file(mut multipart: Multipart) -> Json<Value> {
    let mut filename = String::new();
    let mut size = 0usize;
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        if field.name() == Some("file") {
            filename = field.file_name().unwrap_or_default().to_string();
            size = field.bytes().await.expect("field bytes").len();
        }
    }
    envelope(
        201,
        "file uploaded",
        json!({
            "id": 1,
            "user_id": 1,
            "filename": filename,
            "file_size": size,
            "file_type": "text/plain",
            "description": null,
            "is_public": false,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": null,
            "download_url": "/files/download/1"
        }),
    )
}

async fn download_file(Path(_id): Path<i64>) -> Vec<u8> {
    b"hello mindlink".to_vec()
}

// Endpoint outside the envelope convention.
async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
