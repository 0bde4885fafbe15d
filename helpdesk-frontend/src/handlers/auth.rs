use crate::models::{CompanyApplicationRequest, CurrentUser};
use crate::navigation::home_path;
use crate::services::{metrics, SessionContext};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    // Any non-empty password is accepted by the demo login.
    #[validate(length(min = 1))]
    pub password: String,
}

fn hx_redirect(to: &'static str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("HX-Redirect", HeaderValue::from_static(to));
    (StatusCode::OK, headers, "").into_response()
}

fn error_fragment(status: StatusCode, message: &str) -> Response {
    (
        status,
        Html(format!("<p class='text-red-500 text-sm'>{message}</p>")),
    )
        .into_response()
}

pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {}
}

pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {}
}

pub async fn login_handler(
    mut context: SessionContext,
    Form(payload): Form<LoginRequest>,
) -> Response {
    if payload.validate().is_err() {
        return error_fragment(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please fill in every field",
        );
    }

    let user = CurrentUser::from_login(&payload.email);

    if let Err(e) = context.set_current_user(Some(user.clone())).await {
        tracing::error!(error = %e, "Failed to store user in session");
        return error_fragment(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not sign you in. Please try again.",
        );
    }

    metrics::record_login(user.role.as_str());
    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        role = %user.role,
        "User logged in successfully"
    );

    hx_redirect(home_path(user.role))
}

pub async fn logout_handler(mut context: SessionContext) -> Response {
    let user_id = context.current_user().map(|u| u.id.clone());

    // Logging out always succeeds from the browser's point of view
    if let Err(e) = context.set_current_user(None).await {
        tracing::error!(error = %e, "Failed to clear session user during logout");
    } else if let Some(user_id) = user_id {
        tracing::info!(user_id = %user_id, "User logged out");
    }

    hx_redirect("/")
}

/// Company registration: files an application for platform admin review.
pub async fn register_handler(
    State(state): State<AppState>,
    Form(payload): Form<CompanyApplicationRequest>,
) -> Response {
    if let Err(e) = payload.validate() {
        tracing::debug!(error = %e, "Rejected company application form");
        return error_fragment(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please check the highlighted fields",
        );
    }

    match state.companies.apply(payload).await {
        Ok(application) => (
            StatusCode::OK,
            Html(format!(
                "<p class='text-emerald-500 text-sm'>Application {} received. We will review it shortly.</p>",
                application.id
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::info!(error = %e, "Company application refused");
            error_fragment(
                StatusCode::CONFLICT,
                "A company with that name is already registered",
            )
        }
    }
}
