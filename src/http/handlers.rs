//! Route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceIdentity {
    pub service: String,
}

/// `GET /health`: run one aggregation cycle.
///
/// 200 when every target is up, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    let summary = state.aggregator.aggregate().await;

    let code = if summary.all_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(summary)).into_response()
}

/// `GET /`: identity of the aggregator itself, independent of target health.
pub async fn root(State(state): State<AppState>) -> Json<ServiceIdentity> {
    Json(ServiceIdentity {
        service: state.service_name.to_string(),
    })
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not found" })),
    )
}
