//! User roles and the login-time role resolver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four user categories. Every user holds exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular end user raising tickets.
    User,
    /// Support agent working tickets.
    Agent,
    /// Company administrator.
    Company,
    /// Platform administrator.
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::User, Role::Agent, Role::Company, Role::Admin];

    /// Wire tag, as stored in the session.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
            Role::Company => "company",
            Role::Admin => "admin",
        }
    }

    /// Human-readable badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Agent => "Agent",
            Role::Company => "Company Admin",
            Role::Admin => "Platform Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Derives a role from an email address.
///
/// Placeholder for a real identity provider: case-sensitive substring
/// checks, first match wins, and anything unrecognised is a regular user.
pub fn resolve_role(email: &str) -> Role {
    if email.contains("empresa@") {
        Role::Company
    } else if email.contains("agent@") {
        Role::Agent
    } else if email.contains("admin@") || email.contains("super@") {
        Role::Admin
    } else {
        Role::User
    }
}
