use super::validation::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    Maintenance,
    Error,
    #[default]
    Info,
    Success,
}

/// Company-wide notice shown on the announcements page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    pub id: String,
    pub company: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: AnnouncementKind,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAnnouncement {
    #[validate(
        length(min = 1, max = 120, message = "Title is required"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[validate(
        length(min = 1, message = "Content is required"),
        custom(function = "not_blank")
    )]
    pub content: String,
    #[serde(default, rename = "type")]
    pub kind: AnnouncementKind,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AnnouncementUpdate {
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AnnouncementKind>,
}
