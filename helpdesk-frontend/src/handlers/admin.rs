use crate::models::{Company, CompanyApplication, CompanyOverview, CurrentUser};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use service_core::error::AppError;

pub async fn companies_overview(State(state): State<AppState>) -> Json<CompanyOverview> {
    Json(state.companies.overview().await)
}

pub async fn approve_application(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Company>, AppError> {
    let company = state.companies.approve(&id).await?;
    tracing::info!(application_id = %id, admin_id = %admin.id, "Approved by platform admin");
    Ok(Json(company))
}

pub async fn reject_application(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<CompanyApplication>, AppError> {
    let application = state.companies.reject(&id).await?;
    tracing::info!(application_id = %id, admin_id = %admin.id, "Rejected by platform admin");
    Ok(Json(application))
}
