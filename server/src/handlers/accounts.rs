//! Sign-up, sign-in, sign-out and profile document routes.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use redacao_store::{Profile, ProfileUpdate, UserAccount};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserAccount,
}

/// `POST /api/signup` — account + profile document + open session.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(ApiError::BadRequest(
            "Nome, email e senha são obrigatórios.".to_string(),
        ));
    }

    let account = state
        .identity
        .sign_up(&payload.email, &payload.password, &payload.name)
        .await?;

    let now = Utc::now();
    state
        .profiles
        .upsert(Profile {
            uid: account.uid.clone(),
            name: payload.name,
            email: payload.email,
            grade_level: payload.grade_level,
            bio: payload.bio,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        })
        .await?;

    let session = state.sessions.create(&account.uid).await?;
    info!(uid = %account.uid, "Account created");

    Ok(Json(AuthResponse {
        token: session.token,
        user: account,
    }))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let account = state
        .identity
        .verify_password(&payload.email, &payload.password)
        .await?;
    let session = state.sessions.create(&account.uid).await?;

    Ok(Json(AuthResponse {
        token: session.token,
        user: account,
    }))
}

/// `POST /api/logout`
pub async fn logout(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.sessions.delete(&user.session.token).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `GET /api/me`
pub async fn me(user: CurrentUser) -> Json<UserAccount> {
    Json(user.account)
}

/// `GET /api/profile`
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Profile>, ApiError> {
    let profile = state.profiles.get(&user.account.uid).await?;
    Ok(Json(profile))
}

/// `PUT /api/profile` — partial update; a name change also propagates to
/// the identity provider's display name.
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, ApiError> {
    if let Some(name) = &update.name {
        state
            .identity
            .update_display_name(&user.account.uid, name)
            .await?;
    }

    let profile = state.profiles.update(&user.account.uid, update).await?;
    Ok(Json(profile))
}
