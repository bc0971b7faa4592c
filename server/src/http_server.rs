use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::GRADING_BODY_LIMIT;
use crate::handlers::{accounts, blobs, feed, grading, notifications};
use crate::state::AppState;

/// Builds the application router. Routes registered with a single method
/// reject the others with 405.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route(
            "/api/corrigir",
            post(grading::corrigir).layer(DefaultBodyLimit::max(GRADING_BODY_LIMIT)),
        )
        .route("/api/signup", post(accounts::signup))
        .route("/api/login", post(accounts::login))
        .route("/api/logout", post(accounts::logout))
        .route("/api/me", get(accounts::me))
        .route(
            "/api/profile",
            get(accounts::get_profile).put(accounts::update_profile),
        )
        .route("/api/feed", get(feed::list).post(feed::create))
        .route("/api/feed/events", get(feed::events))
        .route("/api/feed/:id", delete(feed::delete))
        .route("/api/feed/:id/like", post(feed::like))
        .route("/api/feed/:id/comments", post(feed::comment))
        .route(
            "/api/feed/:id/comments/:index/like",
            post(feed::like_comment),
        )
        .route(
            "/api/feed/:id/comments/:index",
            delete(feed::delete_comment),
        )
        .route("/api/notifications", get(notifications::list))
        .route("/blobs/*path", get(blobs::get))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Starting HTTP server on {}", addr);

    // Expired sessions are swept in the background.
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match sessions.cleanup_expired().await {
                Ok(0) => {}
                Ok(count) => info!(count, "Cleaned up expired sessions"),
                Err(e) => warn!(error = %e, "Session cleanup failed"),
            }
        }
    });

    let app = app_router(state);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start HTTP server: {}", e))
}

/// Health check handler
async fn health() -> &'static str {
    "redacao server is running"
}
