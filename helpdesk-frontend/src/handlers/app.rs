use crate::services::SessionContext;
use askama::Template;
use axum::response::IntoResponse;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub logged_in: bool,
}

pub async fn index(context: SessionContext) -> impl IntoResponse {
    IndexTemplate {
        logged_in: context.is_logged_in(),
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
