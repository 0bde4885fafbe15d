use crate::models::{Company, CompanySettingsUpdate, CurrentUser};
use crate::AppState;
use axum::{extract::State, Extension, Json};
use service_core::error::AppError;
use validator::Validate;

/// The viewer's own company record.
pub async fn company_settings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Company>, AppError> {
    Ok(Json(state.companies.company(&user.company).await?))
}

pub async fn update_company_settings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CompanySettingsUpdate>,
) -> Result<Json<Company>, AppError> {
    payload.validate()?;
    let company = state.companies.update_company(&user.company, payload).await?;
    tracing::info!(company = %company.name, by = %user.id, "Company settings saved");
    Ok(Json(company))
}
