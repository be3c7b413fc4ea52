use std::pin::Pin;

use async_stream::stream;
use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, KeepAliveStream, Sse},
        IntoResponse,
    },
    Json,
};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use surrealdb::Action;
use tracing::error;

use common::{error::AppError, storage::types::comment::Comment};

use crate::{api_state::ApiState, error::ApiError, middleware_session_auth::RequireUser};

#[derive(Deserialize)]
pub struct NewCommentParams {
    pub text: String,
}

/// All comments, newest first. Public.
pub async fn list_comments(
    State(state): State<ApiState>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = Comment::get_recent(&state.db).await?;

    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<ApiState>,
    RequireUser(user): RequireUser,
    Json(form): Json<NewCommentParams>,
) -> Result<impl IntoResponse, ApiError> {
    let text = form.text.trim();
    if text.is_empty() {
        return Err(ApiError::ValidationError(
            "Comment text is required".to_string(),
        ));
    }

    let comment = Comment::new(
        text.to_string(),
        user.display_name,
        user.email,
        user.id,
    );

    let stored = state
        .db
        .store_item(comment.clone())
        .await
        .map_err(AppError::from)?;

    Ok(Json(stored.unwrap_or(comment)))
}

pub async fn toggle_like(
    State(state): State<ApiState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = Comment::toggle_like(&id, &user.id, &state.db).await?;

    Ok(Json(comment))
}

/// Live feed of comment changes, the realtime-subscription analog of the
/// original site's snapshot listener. One live query per connected client;
/// the stream ends when the client disconnects or the query errors.
pub async fn comments_live(
    State(state): State<ApiState>,
) -> Sse<KeepAliveStream<Pin<Box<dyn Stream<Item = Result<Event, axum::Error>> + Send>>>> {
    // The client handle moves into the stream so the live query outlives
    // this handler and ends with the connection.
    let db = state.db.clone();

    let events = stream! {
        let mut notifications = match db.listen::<Comment>().await {
            Ok(notifications) => notifications,
            Err(e) => {
                error!("Failed to start comment live query: {:?}", e);
                return;
            }
        };

        while let Some(notification) = notifications.next().await {
            match notification {
                Ok(notification) => {
                    let action = match notification.action {
                        Action::Create => "create",
                        Action::Update => "update",
                        // Comments are never deleted by this code
                        _ => continue,
                    };
                    match serde_json::to_string(&notification.data) {
                        Ok(json) => {
                            yield Ok::<Event, axum::Error>(
                                Event::default().event(action).data(json),
                            );
                        }
                        Err(e) => {
                            error!("Failed to serialize comment notification: {:?}", e);
                        }
                    }
                }
                Err(e) => {
                    error!("Comment live query error: {:?}", e);
                    break;
                }
            }
        }
    };

    Sse::new(events.boxed()).keep_alive(KeepAlive::default())
}
