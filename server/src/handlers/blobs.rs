use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /blobs/*path` — serves stored blobs back under their download URL.
pub async fn get(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let blob = state.blobs.get(path.trim_start_matches('/')).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, blob.content_type)],
        blob.bytes,
    )
        .into_response())
}
