use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::PostId,
    error::{ApiError, ErrorCode},
    protocol::{Post, PostFields},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod store;

use api::{create_post, delete_post, get_post, list_posts, update_post, ApiContext};
use config::{load_seed, load_settings};
use store::PostStore;

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let store = match &settings.seed_path {
        Some(path) => {
            let posts = load_seed(path)?;
            info!(seed = %path.display(), count = posts.len(), "seeded posts");
            PostStore::with_posts(posts)
        }
        None => PostStore::new(),
    };

    let state = AppState {
        api: ApiContext { store },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "posts server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

fn build_router(state: Arc<AppState>) -> Router {
    let posts = api::posts_route();
    Router::new()
        .route("/healthz", get(healthz))
        .route(posts, get(http_list_posts).post(http_create_post))
        .route(
            &format!("{posts}/:id"),
            get(http_get_post)
                .put(http_update_post)
                .delete(http_delete_post),
        )
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_posts(State(state): State<Arc<AppState>>) -> Json<Vec<Post>> {
    Json(list_posts(&state.api).await)
}

async fn http_get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Post> {
    get_post(&state.api, &parse_id(&id))
        .await
        .map(Json)
        .map_err(into_response)
}

async fn http_create_post(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<PostFields>,
) -> Result<(StatusCode, Json<Post>), (StatusCode, Json<ApiError>)> {
    let post = create_post(&state.api, fields)
        .await
        .map_err(into_response)?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn http_update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(fields): Json<PostFields>,
) -> ApiResult<Post> {
    update_post(&state.api, &parse_id(&id), fields)
        .await
        .map(Json)
        .map_err(into_response)
}

async fn http_delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Post> {
    delete_post(&state.api, &parse_id(&id))
        .await
        .map(Json)
        .map_err(into_response)
}

fn parse_id(raw: &str) -> PostId {
    match raw.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

fn into_response(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
