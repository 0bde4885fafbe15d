//! Per-company announcements, held in memory.

use super::error::StoreError;
use crate::models::{
    Announcement, AnnouncementKind, AnnouncementUpdate, CurrentUser, NewAnnouncement,
};
use chrono::{DateTime, Duration, Utc};
use std::cmp::Reverse;
use tokio::sync::RwLock;

pub struct AnnouncementBoard {
    inner: RwLock<Inner>,
}

struct Inner {
    announcements: Vec<Announcement>,
    next_id: u32,
}

impl AnnouncementBoard {
    pub fn new(announcements: Vec<Announcement>) -> Self {
        let next_id = announcements.len() as u32 + 1;
        Self {
            inner: RwLock::new(Inner {
                announcements,
                next_id,
            }),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_announcements(Utc::now()))
    }

    /// The viewer's company announcements, newest first.
    pub async fn list(&self, viewer: &CurrentUser) -> Vec<Announcement> {
        let inner = self.inner.read().await;
        let mut announcements: Vec<Announcement> = inner
            .announcements
            .iter()
            .filter(|a| a.company == viewer.company)
            .cloned()
            .collect();
        announcements.sort_by_key(|a| Reverse(a.created_at));
        announcements
    }

    pub async fn publish(&self, author: &CurrentUser, new: NewAnnouncement) -> Announcement {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let announcement = Announcement {
            id: format!("ANN-{:03}", inner.next_id),
            company: author.company.clone(),
            title: new.title.trim().to_string(),
            content: new.content.trim().to_string(),
            kind: new.kind,
            author: author.name.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.next_id += 1;
        inner.announcements.push(announcement.clone());

        tracing::info!(
            announcement_id = %announcement.id,
            company = %announcement.company,
            "Announcement published"
        );
        announcement
    }

    pub async fn edit(
        &self,
        editor: &CurrentUser,
        id: &str,
        update: AnnouncementUpdate,
    ) -> Result<Announcement, StoreError> {
        let mut inner = self.inner.write().await;
        let announcement = inner
            .announcements
            .iter_mut()
            .find(|a| a.id == id && a.company == editor.company)
            .ok_or_else(|| StoreError::AnnouncementNotFound(id.to_string()))?;

        if let Some(title) = update.title {
            announcement.title = title.trim().to_string();
        }
        if let Some(content) = update.content {
            announcement.content = content.trim().to_string();
        }
        if let Some(kind) = update.kind {
            announcement.kind = kind;
        }
        announcement.updated_at = Utc::now();
        Ok(announcement.clone())
    }
}

fn seed_announcements(now: DateTime<Utc>) -> Vec<Announcement> {
    let seed = |id: &str, company: &str, title: &str, content: &str, kind, age_hours: i64| {
        Announcement {
            id: id.to_string(),
            company: company.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            kind,
            author: "Carlos Company Admin".to_string(),
            created_at: now - Duration::hours(age_hours),
            updated_at: now - Duration::hours(age_hours),
        }
    };

    vec![
        seed(
            "ANN-001",
            "UniValle",
            "Scheduled Maintenance",
            "The campus portal will be offline Saturday from 02:00 to 04:00.",
            AnnouncementKind::Maintenance,
            48,
        ),
        seed(
            "ANN-002",
            "UniValle",
            "Server Issues Resolved",
            "Email delivery delays from this morning have been fixed.",
            AnnouncementKind::Success,
            6,
        ),
        seed(
            "ANN-003",
            "RetailMax",
            "New Feature Available",
            "Ticket attachments now support PDF previews.",
            AnnouncementKind::Info,
            24,
        ),
    ]
}
