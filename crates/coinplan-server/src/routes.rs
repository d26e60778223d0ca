use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use coinplan_engine::EngineError;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router: the analysis endpoint, with static
/// assets served from `static_dir` for everything else.
pub fn router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/analyze/{token}", get(analyze))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /analyze/{token}
async fn analyze(Path(token): Path<String>, State(state): State<AppState>) -> Response {
    match state.coordinator.analyze_token(&token).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Map engine outcomes to distinguishable status codes; every error
/// body keeps the same `{ "error": message }` shape.
fn error_response(err: &EngineError) -> Response {
    let status = match err {
        EngineError::CoinNotFound => StatusCode::NOT_FOUND,
        EngineError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Gateway { .. } => StatusCode::BAD_GATEWAY,
    };
    let body = serde_json::json!({ "error": err.to_string() });
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_per_error_kind() {
        assert_eq!(
            error_response(&EngineError::CoinNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(&EngineError::InsufficientData {
                required: 5,
                provided: 1
            })
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
