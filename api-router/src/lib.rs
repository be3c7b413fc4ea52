use api_state::ApiState;
use axum::{
    extract::FromRef,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use axum_session::{SessionLayer, SessionStore};
use axum_session_auth::{AuthConfig, AuthSession, AuthSessionLayer};
use axum_session_surreal::SessionSurrealPool;
use common::storage::types::user::User;
use middleware_session_auth::require_auth;
use surrealdb::{engine::any::Any, Surreal};

pub mod api_state;
pub mod error;
pub mod middleware_session_auth;
mod routes;

pub type AuthSessionType = AuthSession<User, String, SessionSurrealPool<Any>, Surreal<Any>>;
pub type SessionStoreType = SessionStore<SessionSurrealPool<Any>>;
pub type OpenAIClientType = async_openai::Client<async_openai::config::OpenAIConfig>;

/// Router for the site API: chat proxy, auth, comments, chat history, probes.
pub fn api_routes<S>(app_state: &ApiState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ApiState: FromRef<S>,
{
    // Public endpoints: probes, the chat proxy, auth, and comment reading
    let public = Router::new()
        .route("/live", get(routes::probes::live))
        .route("/ready", get(routes::probes::ready))
        .route("/chat", post(routes::chat::chat_completion))
        .route("/auth/signup", post(routes::auth::signup))
        .route("/auth/signin", post(routes::auth::signin))
        .route("/auth/signout", post(routes::auth::signout))
        .route("/auth/me", get(routes::auth::current_user))
        .route("/comments", get(routes::comments::list_comments))
        .route("/comments/live", get(routes::comments::comments_live));

    // Session-gated endpoints (require a signed-in user)
    let protected = Router::new()
        .route("/comments", post(routes::comments::create_comment))
        .route("/comments/{id}/like", post(routes::comments::toggle_like))
        .route(
            "/messages",
            get(routes::messages::list_messages).post(routes::messages::create_message),
        )
        .route_layer(from_fn(require_auth));

    public
        .merge(protected)
        .layer(
            AuthSessionLayer::<User, String, SessionSurrealPool<Any>, Surreal<Any>>::new(Some(
                app_state.db.client.clone(),
            ))
            .with_config(AuthConfig::<String>::default()),
        )
        .layer(SessionLayer::new((*app_state.session_store).clone()))
}
