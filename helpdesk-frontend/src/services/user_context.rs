//! Current-user context.
//!
//! Holds at most one user, persisted through a [`UserStore`]. Handlers get
//! it passed in explicitly (as an extractor) and ask it permission
//! questions; every check is false while nobody is logged in.

use super::user_store::{SessionUserStore, UserStore};
use crate::access::Permission;
use crate::models::CurrentUser;
use service_core::error::AppError;

pub struct UserContext<S: UserStore> {
    store: S,
    current: Option<CurrentUser>,
}

/// Context bound to the request's browser session.
pub type SessionContext = UserContext<SessionUserStore>;

impl<S: UserStore> UserContext<S> {
    /// Restores the persisted user, if any.
    ///
    /// Unreadable or unparsable data is logged, removed and treated as
    /// logged out.
    pub async fn load(store: S) -> Self {
        let raw = match store.read().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved user, treating as logged out");
                None
            }
        };

        let current = match raw {
            None => None,
            Some(raw) => match serde_json::from_str::<CurrentUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding malformed saved user");
                    if let Err(e) = store.remove().await {
                        tracing::warn!(error = %e, "Failed to remove malformed saved user");
                    }
                    None
                }
            },
        };

        Self { store, current }
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Replaces the current user and persists the change.
    /// `None` logs out and removes the stored record.
    pub async fn set_current_user(&mut self, user: Option<CurrentUser>) -> Result<(), AppError> {
        match &user {
            Some(user) => {
                let raw = serde_json::to_string(user)?;
                self.store.write(raw).await?;
            }
            None => self.store.remove().await?,
        }
        self.current = user;
        Ok(())
    }

    pub fn check_permission(&self, permission: Permission) -> bool {
        self.current
            .as_ref()
            .is_some_and(|user| user.has_permission(permission))
    }

    pub fn check_any_permission(&self, permissions: &[Permission]) -> bool {
        self.current
            .as_ref()
            .is_some_and(|user| user.has_any_permission(permissions))
    }

    pub fn into_current_user(self) -> Option<CurrentUser> {
        self.current
    }
}
