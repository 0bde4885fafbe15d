use crate::access::{AccessGate, Denial};
use crate::services::{metrics, SessionContext, SessionUserStore, UserContext};
use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use service_core::error::AppError;
use tower_sessions::Session;

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to extract session",
                )
                    .into_response()
            })?;

        Ok(UserContext::load(SessionUserStore::new(session)).await)
    }
}

/// Route guard: runs the gate against the session user.
///
/// Anonymous visitors are sent to the login page; other denials get a 403.
/// On success the user is available to the handler as `Extension<CurrentUser>`.
pub async fn require_access(
    State(gate): State<AccessGate>,
    context: SessionContext,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match gate.check(context.current_user()) {
        Ok(()) => {
            if let Some(user) = context.into_current_user() {
                request.extensions_mut().insert(user);
            }
            next.run(request).await
        }
        Err(denial) => {
            metrics::record_access_denied(denial.reason());
            tracing::info!(
                path = %request.uri().path(),
                reason = denial.reason(),
                "Access denied: {}",
                denial
            );
            match denial {
                Denial::NoUser => Redirect::to("/login").into_response(),
                other => AppError::Forbidden(anyhow::anyhow!(other)).into_response(),
            }
        }
    }
}
