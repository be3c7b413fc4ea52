use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;

use common::{
    error::AppError,
    storage::types::chat_message::{ChatMessage, MessageRole},
};

use crate::{api_state::ApiState, error::ApiError, middleware_session_auth::RequireUser};

#[derive(Deserialize)]
pub struct NewMessageParams {
    pub text: String,
    pub role: MessageRole,
}

/// The signed-in user's chat history, oldest first.
pub async fn list_messages(
    State(state): State<ApiState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, ApiError> {
    let messages = ChatMessage::get_user_history(&user.id, &state.db).await?;

    Ok(Json(messages))
}

/// Persist one side of an exchange. The client calls this after updating its
/// own display, once per turn; the writes are independent of the proxy call
/// by design (display first, persist after).
pub async fn create_message(
    State(state): State<ApiState>,
    RequireUser(user): RequireUser,
    Json(form): Json<NewMessageParams>,
) -> Result<impl IntoResponse, ApiError> {
    if form.text.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "Message text is required".to_string(),
        ));
    }

    let message = ChatMessage::new(form.text, form.role, user.id);

    let stored = state
        .db
        .store_item(message.clone())
        .await
        .map_err(AppError::from)?;

    Ok(Json(stored.unwrap_or(message)))
}
