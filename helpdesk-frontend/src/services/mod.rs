pub mod announcements;
pub mod company_registry;
pub mod directory;
pub mod error;
pub mod metrics;
pub mod ticket_store;
pub mod user_context;
pub mod user_store;

pub use announcements::AnnouncementBoard;
pub use company_registry::CompanyRegistry;
pub use directory::UserDirectory;
pub use error::StoreError;
pub use ticket_store::TicketStore;
pub use user_context::{SessionContext, UserContext};
pub use user_store::{MemoryUserStore, SessionUserStore, UserStore, USER_STORAGE_KEY};
