use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use redacao_store::{Session, UserAccount};

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor that resolves the `Authorization: Bearer <token>` header to
/// the authenticated account via the session store. Missing or invalid
/// tokens reject with 401.
pub struct CurrentUser {
    pub account: UserAccount,
    pub session: Session,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let session = state
            .sessions
            .get(token)
            .await
            .map_err(|_| ApiError::Unauthorized)?;
        let account = state
            .identity
            .get_user(&session.uid)
            .await
            .map_err(|_| ApiError::Unauthorized)?;

        Ok(CurrentUser { account, session })
    }
}
