use axum::{Json, extract::Request, response::IntoResponse};

use super::{ApiError, HealthResponse};

/// `GET /api/health`
///
/// Liveness probe. Does not touch the upstream data source.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn fallback(req: Request) -> ApiError {
    ApiError::not_found(req.uri().path())
}
