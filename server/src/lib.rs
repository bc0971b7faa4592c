//! HTTP surface: the essay-grading proxy plus the account, profile, feed,
//! notification and blob routes, all served from one axum router.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http_server;
pub mod state;

pub use config::AppConfig;
pub use error::ApiError;
pub use http_server::{app_router, run_server};
pub use state::AppState;
