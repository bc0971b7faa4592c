//! Social feed routes: publish, list, like, comment, delete, plus the SSE
//! live-snapshot stream.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use base64::Engine;
use futures::Stream;
use redacao_store::{post_image_path, NewComment, NewPost, NotificationKind, Post};
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Shown when a profile carries no avatar, as in the original UI.
const DEFAULT_AVATAR: &str = "/avatar-default.png";

#[derive(Deserialize)]
pub struct ImageUpload {
    pub filename: String,
    /// Base64-encoded file content.
    pub data: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// Author name and avatar as shown on posts, resolved from the profile
/// document with the account display name as fallback.
async fn author_identity(state: &AppState, user: &CurrentUser) -> (String, String) {
    match state.profiles.get(&user.account.uid).await {
        Ok(profile) => {
            let avatar = profile
                .avatar_url
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string());
            (profile.name, avatar)
        }
        Err(_) => (
            user.account.display_name.clone(),
            DEFAULT_AVATAR.to_string(),
        ),
    }
}

async fn notify_author(state: &AppState, post: &Post, actor: &str, kind: NotificationKind) {
    if post.author == actor {
        return;
    }
    if let Err(e) = state.notifications.push(&post.author, actor, kind).await {
        // Notifications are best-effort; the feed write already landed.
        warn!(error = %e, "Failed to push notification");
    }
}

/// `GET /api/feed`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state.feed.list_posts().await?;
    Ok(Json(posts))
}

/// `POST /api/feed` — text and/or image; an image is uploaded to blob
/// storage first and its download URL embedded in the post.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    let text = payload.text.trim().to_string();
    if text.is_empty() && payload.image.is_none() {
        return Err(ApiError::BadRequest(
            "O post precisa de texto ou imagem.".to_string(),
        ));
    }

    let image_url = match payload.image {
        Some(image) => {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(image.data.as_bytes())
                .map_err(|_| ApiError::BadRequest("Imagem inválida.".to_string()))?;
            let path = post_image_path(&user.account.uid, &image.filename);
            let content_type = image.content_type.as_deref().unwrap_or("image/png");
            Some(state.blobs.put(&path, bytes, content_type).await?)
        }
        None => None,
    };

    let (author, avatar) = author_identity(&state, &user).await;
    let post = state
        .feed
        .create_post(NewPost {
            author_uid: user.account.uid.clone(),
            author,
            avatar,
            text,
            image_url,
        })
        .await?;
    info!(id = %post.id, "Post published");

    Ok(Json(post))
}

/// `DELETE /api/feed/:id` — author only, matched by account id so a
/// shared display name grants nothing.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let post = state.feed.get_post(&id).await?;
    if post.author_uid != user.account.uid {
        return Err(ApiError::Forbidden(
            "Apenas o autor pode apagar o post.".to_string(),
        ));
    }

    state.feed.delete_post(&id).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/feed/:id/like` — atomic, idempotent set-add.
pub async fn like(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let uid = &user.account.uid;
    let already_liked = state
        .feed
        .get_post(&id)
        .await?
        .likes
        .iter()
        .any(|l| l == uid);
    let post = state.feed.like_post(&id, uid).await?;

    // A re-like changes nothing and notifies nobody.
    if !already_liked {
        let (actor, _) = author_identity(&state, &user).await;
        notify_author(&state, &post, &actor, NotificationKind::Like).await;
    }

    Ok(Json(post))
}

/// `POST /api/feed/:id/comments`
pub async fn comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<Json<Post>, ApiError> {
    let text = payload.text.trim().to_string();
    if text.is_empty() {
        return Err(ApiError::BadRequest(
            "O comentário não pode ser vazio.".to_string(),
        ));
    }

    let (author, avatar) = author_identity(&state, &user).await;
    let post = state
        .feed
        .add_comment(
            &id,
            NewComment {
                author_uid: user.account.uid.clone(),
                author: author.clone(),
                avatar,
                text,
            },
        )
        .await?;

    notify_author(&state, &post, &author, NotificationKind::Comment).await;

    Ok(Json(post))
}

/// `POST /api/feed/:id/comments/:index/like`
pub async fn like_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<Post>, ApiError> {
    let post = state.feed.like_comment(&id, index, &user.account.uid).await?;
    Ok(Json(post))
}

/// `DELETE /api/feed/:id/comments/:index` — comment author only.
pub async fn delete_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<Post>, ApiError> {
    let post = state.feed.get_post(&id).await?;
    let comment = post
        .comments
        .get(index)
        .ok_or_else(|| ApiError::NotFound(format!("comentário {index}")))?;

    if comment.author_uid != user.account.uid {
        return Err(ApiError::Forbidden(
            "Apenas o autor pode apagar o comentário.".to_string(),
        ));
    }

    let post = state.feed.delete_comment(&id, index).await?;
    Ok(Json(post))
}

/// `GET /api/feed/events` — server-sent stream of feed snapshots. The
/// subscription ends (and the listener is released) when the client
/// disconnects and the stream is dropped.
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.feed.subscribe();

    let stream = async_stream::stream! {
        // Current snapshot first, then one event per change.
        loop {
            let posts = rx.borrow_and_update().clone();
            if let Ok(event) = Event::default().json_data(&posts) {
                yield Ok(event);
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
