//! Declarative access gate.
//!
//! A gate bundles optional role and permission filters. Every supplied
//! filter must pass for access to be granted, and a missing user never
//! passes.

use super::{has_all_permissions, has_any_permission, has_permission, Permission, Role};
use crate::models::CurrentUser;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    permission: Option<Permission>,
    permissions: Option<Vec<Permission>>,
    role: Option<Role>,
    roles: Option<Vec<Role>>,
    require_all: bool,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self {
            permission: None,
            permissions: None,
            role: None,
            roles: None,
            require_all: true,
        }
    }
}

/// Why a gate refused access. Reported for the first failing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    NoUser,
    RoleMismatch { required: Role, actual: Role },
    RoleNotAllowed { actual: Role },
    MissingPermission(Permission),
    InsufficientPermissions { require_all: bool },
}

impl Denial {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Denial::NoUser => "no_user",
            Denial::RoleMismatch { .. } => "role_mismatch",
            Denial::RoleNotAllowed { .. } => "role_not_allowed",
            Denial::MissingPermission(_) => "missing_permission",
            Denial::InsufficientPermissions { .. } => "insufficient_permissions",
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::NoUser => write!(f, "not logged in"),
            Denial::RoleMismatch { required, actual } => {
                write!(f, "role {actual} is not {required}")
            }
            Denial::RoleNotAllowed { actual } => write!(f, "role {actual} is not allowed here"),
            Denial::MissingPermission(p) => write!(f, "missing permission {p}"),
            Denial::InsufficientPermissions { require_all: true } => {
                write!(f, "missing one or more required permissions")
            }
            Denial::InsufficientPermissions { require_all: false } => {
                write!(f, "none of the accepted permissions are granted")
            }
        }
    }
}

impl std::error::Error for Denial {}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions = Some(permissions.into_iter().collect());
        self
    }

    /// Switch the permission list between "all of" (default) and "any of".
    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }

    pub fn admin_only() -> Self {
        Self::new().roles([Role::Admin])
    }

    pub fn agent_only() -> Self {
        Self::new().roles([Role::Agent, Role::Admin])
    }

    pub fn user_only() -> Self {
        Self::new().role(Role::User)
    }

    pub fn check(&self, user: Option<&CurrentUser>) -> Result<(), Denial> {
        let Some(user) = user else {
            return Err(Denial::NoUser);
        };

        if let Some(required) = self.role {
            if user.role != required {
                return Err(Denial::RoleMismatch {
                    required,
                    actual: user.role,
                });
            }
        }

        if let Some(roles) = &self.roles {
            if !roles.contains(&user.role) {
                return Err(Denial::RoleNotAllowed { actual: user.role });
            }
        }

        if let Some(permission) = self.permission {
            if !has_permission(user.role, permission) {
                return Err(Denial::MissingPermission(permission));
            }
        }

        if let Some(permissions) = &self.permissions {
            let granted = if self.require_all {
                has_all_permissions(user.role, permissions)
            } else {
                has_any_permission(user.role, permissions)
            };
            if !granted {
                return Err(Denial::InsufficientPermissions {
                    require_all: self.require_all,
                });
            }
        }

        Ok(())
    }

    pub fn allows(&self, user: Option<&CurrentUser>) -> bool {
        self.check(user).is_ok()
    }

    /// Produces `children` when access is granted, `fallback` otherwise.
    pub fn render<T>(
        &self,
        user: Option<&CurrentUser>,
        children: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.allows(user) {
            children()
        } else {
            fallback()
        }
    }
}
