use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use shared::error::ErrorCode;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    posts: Arc<Mutex<Vec<Post>>>,
    accept_headers: Arc<Mutex<Vec<String>>>,
    empty_delete_body: bool,
}

impl ServerState {
    async fn record_accept(&self, headers: &HeaderMap) {
        let accept = headers
            .get("accept")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.accept_headers.lock().await.push(accept);
    }
}

type Failure = (StatusCode, Json<ApiError>);

async fn handle_list(State(state): State<ServerState>, headers: HeaderMap) -> Json<Vec<Post>> {
    state.record_accept(&headers).await;
    Json(state.posts.lock().await.clone())
}

async fn handle_create(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(fields): Json<PostFields>,
) -> (StatusCode, Json<Post>) {
    state.record_accept(&headers).await;
    let mut posts = state.posts.lock().await;
    let post = fields.with_id(PostId::Number(posts.len() as i64 + 1));
    posts.push(post.clone());
    (StatusCode::CREATED, Json(post))
}

async fn handle_update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(post): Json<Post>,
) -> Result<Json<Post>, Failure> {
    let mut posts = state.posts.lock().await;
    let slot = posts
        .iter_mut()
        .find(|p| p.id.to_string() == id)
        .ok_or_else(|| not_found(&id))?;
    *slot = post.clone();
    Ok(Json(post))
}

async fn handle_delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<String, Failure> {
    let mut posts = state.posts.lock().await;
    let index = posts
        .iter()
        .position(|p| p.id.to_string() == id)
        .ok_or_else(|| not_found(&id))?;
    let removed = posts.remove(index);
    if state.empty_delete_body {
        Ok(String::new())
    } else {
        Ok(serde_json::to_string(&removed).expect("json"))
    }
}

fn not_found(id: &str) -> Failure {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, format!("post {id} not found"))),
    )
}

async fn spawn_posts_server(state: ServerState) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/posts", get(handle_list).post(handle_create))
        .route("/posts/:id", axum::routing::put(handle_update).delete(handle_delete))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}/posts"))
}

fn seeded_state() -> ServerState {
    let state = ServerState::default();
    state.posts.try_lock().expect("fresh lock").extend([
        PostFields::new("hello", "world").with_id(PostId::Number(1)),
        PostFields::new("spaced", "id").with_id(PostId::Text("a b".into())),
    ]);
    state
}

fn client_for(endpoint: &str) -> HttpPostsApi {
    HttpPostsApi::new(Url::parse(endpoint).expect("endpoint"))
}

#[tokio::test]
async fn list_posts_requests_json() {
    let state = seeded_state();
    let endpoint = spawn_posts_server(state.clone()).await.expect("server");

    let posts = client_for(&endpoint).list_posts().await.expect("list");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].id, PostId::Text("a b".into()));
    assert_eq!(*state.accept_headers.lock().await, vec![JSON.to_string()]);
}

#[tokio::test]
async fn create_post_returns_server_assigned_id() {
    let state = ServerState::default();
    let endpoint = spawn_posts_server(state.clone()).await.expect("server");

    let created = client_for(&endpoint)
        .create_post(&PostFields::new("A", "B"))
        .await
        .expect("create");
    assert_eq!(created, PostFields::new("A", "B").with_id(PostId::Number(1)));
    assert_eq!(state.posts.lock().await.len(), 1);
}

#[tokio::test]
async fn update_post_targets_escaped_item_path() {
    let state = seeded_state();
    let endpoint = spawn_posts_server(state.clone()).await.expect("server");

    let edited = PostFields::new("renamed", "id").with_id(PostId::Text("a b".into()));
    let updated = client_for(&endpoint)
        .update_post(&edited)
        .await
        .expect("update");
    assert_eq!(updated, edited);
    assert_eq!(state.posts.lock().await[1].title, "renamed");
}

#[tokio::test]
async fn trailing_slash_endpoint_still_builds_item_paths() {
    let state = seeded_state();
    let endpoint = spawn_posts_server(state.clone()).await.expect("server");
    let client = client_for(&format!("{endpoint}/"));

    let deleted = client
        .delete_post(&PostId::Number(1))
        .await
        .expect("delete");
    assert_eq!(deleted.id(), Some(&PostId::Number(1)));
    assert_eq!(state.posts.lock().await.len(), 1);
}

#[tokio::test]
async fn delete_post_accepts_empty_body() {
    let state = ServerState {
        empty_delete_body: true,
        ..seeded_state()
    };
    let endpoint = spawn_posts_server(state.clone()).await.expect("server");

    let deleted = client_for(&endpoint)
        .delete_post(&PostId::Number(1))
        .await
        .expect("delete");
    assert_eq!(deleted.id(), None);
    assert_eq!(state.posts.lock().await.len(), 1);
}

#[tokio::test]
async fn server_error_body_message_is_surfaced() {
    let endpoint = spawn_posts_server(seeded_state()).await.expect("server");

    let err = client_for(&endpoint)
        .update_post(&PostFields::new("t", "b").with_id(PostId::Number(404)))
        .await
        .expect_err("missing post");
    let message = err.to_string();
    assert!(message.contains("404"), "{message}");
    assert!(message.contains("post 404 not found"), "{message}");
}

#[tokio::test]
async fn unreachable_server_is_an_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client_for(&format!("http://{addr}/posts"))
        .list_posts()
        .await
        .expect_err("connection refused");
    assert!(format!("{err:#}").contains("GET"));
}

#[test]
fn from_settings_rejects_bad_endpoint() {
    let settings = ClientSettings {
        endpoint: "not a url".into(),
        ..ClientSettings::default()
    };
    assert!(HttpPostsApi::from_settings(&settings).is_err());
}
