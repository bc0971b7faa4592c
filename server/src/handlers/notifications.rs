use axum::extract::State;
use axum::Json;
use redacao_store::Notification;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/notifications` — the caller's notifications, newest first.
/// Keyed by display name, matching the original data model.
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let recipient = match state.profiles.get(&user.account.uid).await {
        Ok(profile) => profile.name,
        Err(_) => user.account.display_name,
    };

    let notifications = state.notifications.list_for(&recipient).await?;
    Ok(Json(notifications))
}
