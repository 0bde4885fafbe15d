use crate::models::{Announcement, AnnouncementUpdate, CurrentUser, NewAnnouncement};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use service_core::error::AppError;
use validator::Validate;

pub async fn list_announcements(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Json<Vec<Announcement>> {
    Json(state.announcements.list(&user).await)
}

pub async fn publish_announcement(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewAnnouncement>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    payload.validate()?;
    let announcement = state.announcements.publish(&user, payload).await;
    Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn edit_announcement(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<AnnouncementUpdate>,
) -> Result<Json<Announcement>, AppError> {
    payload.validate()?;
    Ok(Json(state.announcements.edit(&user, &id, payload).await?))
}
