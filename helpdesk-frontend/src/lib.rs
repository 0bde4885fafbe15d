pub mod access;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod services;
pub mod startup;

use services::{AnnouncementBoard, CompanyRegistry, TicketStore, UserDirectory};
use std::sync::Arc;

/// Shared application state: the in-memory demo stores.
#[derive(Clone)]
pub struct AppState {
    pub tickets: Arc<TicketStore>,
    pub companies: Arc<CompanyRegistry>,
    pub members: Arc<UserDirectory>,
    pub announcements: Arc<AnnouncementBoard>,
}

impl AppState {
    /// State preloaded with the demo data.
    pub fn seeded() -> Self {
        Self {
            tickets: Arc::new(TicketStore::seeded()),
            companies: Arc::new(CompanyRegistry::seeded()),
            members: Arc::new(UserDirectory::seeded()),
            announcements: Arc::new(AnnouncementBoard::seeded()),
        }
    }
}
