use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_sessions::Session;

/// Storage key under which the serialized current user lives.
pub const USER_STORAGE_KEY: &str = "helpdesk_user";

/// Key-value slot holding the raw JSON of the current user.
///
/// The context parses the value itself so that corrupt data can be told
/// apart from a missing value.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn read(&self) -> Result<Option<String>, AppError>;
    async fn write(&self, value: String) -> Result<(), AppError>;
    async fn remove(&self) -> Result<(), AppError>;
}

/// Per-browser storage backed by the tower-sessions session.
#[derive(Clone, Debug)]
pub struct SessionUserStore {
    session: Session,
}

impl SessionUserStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

fn session_error(err: tower_sessions::session::Error) -> AppError {
    AppError::SessionError(err.to_string())
}

#[async_trait]
impl UserStore for SessionUserStore {
    async fn read(&self) -> Result<Option<String>, AppError> {
        self.session
            .get::<String>(USER_STORAGE_KEY)
            .await
            .map_err(session_error)
    }

    async fn write(&self, value: String) -> Result<(), AppError> {
        self.session
            .insert(USER_STORAGE_KEY, value)
            .await
            .map_err(session_error)
    }

    async fn remove(&self) -> Result<(), AppError> {
        self.session
            .remove::<String>(USER_STORAGE_KEY)
            .await
            .map(|_| ())
            .map_err(session_error)
    }
}

/// Process-local slot. Clones share the same value, which lets a test
/// "reload" by building a fresh context over a clone.
#[derive(Clone, Debug, Default)]
pub struct MemoryUserStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with raw contents, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    pub async fn raw(&self) -> Option<String> {
        self.slot.lock().await.clone()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn read(&self) -> Result<Option<String>, AppError> {
        Ok(self.slot.lock().await.clone())
    }

    async fn write(&self, value: String) -> Result<(), AppError> {
        *self.slot.lock().await = Some(value);
        Ok(())
    }

    async fn remove(&self) -> Result<(), AppError> {
        self.slot.lock().await.take();
        Ok(())
    }
}
