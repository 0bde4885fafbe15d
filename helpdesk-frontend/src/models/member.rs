use super::validation::not_blank;
use crate::access::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
    /// Invited but not signed in yet.
    Pending,
}

/// A person registered under a company: requester, agent or company admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: Role,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
}

/// Query-string filter for member lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberFilter {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub status: Option<MemberStatus>,
}

impl MemberFilter {
    pub fn agents() -> Self {
        Self {
            role: Some(Role::Agent),
            ..Self::default()
        }
    }

    pub fn matches(&self, member: &Member) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                member.name.to_lowercase().contains(&term)
                    || member.email.to_lowercase().contains(&term)
            }
        };

        matches_search
            && self.role.map_or(true, |r| member.role == r)
            && self.status.map_or(true, |s| member.status == s)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewMember {
    #[validate(
        length(min = 1, max = 120, message = "Name is required"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default = "default_member_role")]
    pub role: Role,
}

fn default_member_role() -> Role {
    Role::User
}

/// Invitation sent from the agent management page.
#[derive(Debug, Deserialize, Validate)]
pub struct NewAgent {
    #[validate(
        length(min = 1, max = 120, message = "Name is required"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

impl From<NewAgent> for NewMember {
    fn from(agent: NewAgent) -> Self {
        Self {
            name: agent.name,
            email: agent.email,
            role: Role::Agent,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct MemberUpdate {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    pub status: Option<MemberStatus>,
}
