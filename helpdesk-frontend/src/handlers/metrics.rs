use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub async fn metrics() -> Response {
    match crate::services::metrics::get_metrics() {
        Ok(body) => body.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
