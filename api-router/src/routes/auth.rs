use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use common::{
    error::AppError,
    storage::types::user::{User, UserView},
};

use crate::{api_state::ApiState, error::ApiError, AuthSessionType};

#[derive(Deserialize, Serialize)]
pub struct SignupParams {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Deserialize, Serialize)]
pub struct SigninParams {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

pub async fn signup(
    State(state): State<ApiState>,
    auth: AuthSessionType,
    Json(form): Json<SignupParams>,
) -> Result<impl IntoResponse, ApiError> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Err(ApiError::ValidationError(
            "Email and password are required".to_string(),
        ));
    }

    let display_name = if form.display_name.trim().is_empty() {
        // Fall back to the mailbox name, as the comment board displays it
        form.email
            .split('@')
            .next()
            .unwrap_or(&form.email)
            .to_string()
    } else {
        form.display_name.trim().to_string()
    };

    let user = User::create_new(form.email, form.password, display_name, &state.db)
        .await
        .map_err(|e| match e {
            AppError::Auth(msg) => ApiError::ValidationError(msg),
            other => other.into(),
        })?;

    auth.login_user(user.id.clone());

    Ok(Json(UserView::from(user)))
}

pub async fn signin(
    State(state): State<ApiState>,
    auth: AuthSessionType,
    Json(form): Json<SigninParams>,
) -> Result<impl IntoResponse, ApiError> {
    let user = match User::authenticate(&form.email, &form.password, &state.db).await {
        Ok(user) => user,
        Err(_) => {
            return Err(ApiError::Unauthorized(
                "Incorrect email or password".to_string(),
            ));
        }
    };

    auth.login_user(user.id.clone());

    if form.remember_me {
        auth.remember_user(true);
    }

    Ok(Json(UserView::from(user)))
}

pub async fn signout(auth: AuthSessionType) -> impl IntoResponse {
    if auth.is_authenticated() {
        auth.logout_user();
    }

    Json(json!({ "status": "ok" }))
}

/// The polling analog of the original's current-user observable.
pub async fn current_user(auth: AuthSessionType) -> Result<impl IntoResponse, ApiError> {
    match auth.current_user {
        Some(user) => Ok(Json(UserView::from(user))),
        None => Err(ApiError::Unauthorized("Not signed in".to_string())),
    }
}
