use crate::models::{CurrentUser, Member, MemberFilter, MemberUpdate, NewAgent, NewMember};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use service_core::error::AppError;
use validator::Validate;

pub async fn list_members(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(filter): Query<MemberFilter>,
) -> Json<Vec<Member>> {
    Json(state.members.list(&user, &filter).await)
}

pub async fn create_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewMember>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    payload.validate()?;
    let member = state.members.add(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<MemberUpdate>,
) -> Result<Json<Member>, AppError> {
    payload.validate()?;
    Ok(Json(state.members.update(&user, &id, payload).await?))
}

pub async fn delete_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Member>, AppError> {
    Ok(Json(state.members.remove(&user, &id).await?))
}

/// Agents of the viewer's company.
pub async fn list_agents(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Json<Vec<Member>> {
    Json(state.members.list(&user, &MemberFilter::agents()).await)
}

pub async fn invite_agent(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewAgent>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    payload.validate()?;
    let agent = state.members.add(&user, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

pub async fn remove_agent(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Member>, AppError> {
    Ok(Json(state.members.remove_agent(&user, &id).await?))
}
