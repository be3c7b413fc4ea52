use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use tracing::error;

use crate::api_state::ApiState;

/// Process liveness. Answers as long as the router is serving at all.
pub async fn live() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Readiness. Runs a trivial query against the database; a failure is logged
/// and reported only as a failed check, never with the underlying error text.
pub async fn ready(State(state): State<ApiState>) -> impl IntoResponse {
    let check = state.db.client.query("RETURN true").await.map(|_| ());

    ready_response(check)
}

fn ready_response(check: Result<(), surrealdb::Error>) -> (StatusCode, Json<Value>) {
    match check {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "checks": { "db": "ok" }
            })),
        ),
        Err(e) => {
            error!("Readiness check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "checks": { "db": "fail" }
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_with_cookies, response_json, test_router, unroutable_base_url};

    #[tokio::test]
    async fn test_probes_report_a_healthy_database() {
        let app = test_router(&unroutable_base_url()).await;

        let live = get_with_cookies(app.clone(), "/live", "").await;
        assert_eq!(live.status(), StatusCode::OK);

        let ready = get_with_cookies(app, "/ready", "").await;
        assert_eq!(ready.status(), StatusCode::OK);
        let body = response_json(ready).await;
        assert_eq!(body, json!({ "status": "ok", "checks": { "db": "ok" } }));
    }

    #[test]
    fn test_failed_check_does_not_leak_database_detail() {
        let err = surrealdb::error::Db::Thrown("db password incorrect".to_string());

        let (status, Json(body)) = ready_response(Err(err.into()));

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({ "status": "error", "checks": { "db": "fail" } }));
        assert!(!body.to_string().contains("db password incorrect"));
    }
}
