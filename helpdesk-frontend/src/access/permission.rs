//! Permission tags and the static role → permission table.

use super::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named capability grant. Wire form is the dotted name, e.g. `tickets.close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    // Tickets
    #[serde(rename = "tickets.view.own")]
    TicketsViewOwn,
    #[serde(rename = "tickets.view.all")]
    TicketsViewAll,
    #[serde(rename = "tickets.create")]
    TicketsCreate,
    #[serde(rename = "tickets.respond.own")]
    TicketsRespondOwn,
    #[serde(rename = "tickets.respond.all")]
    TicketsRespondAll,
    #[serde(rename = "tickets.assign")]
    TicketsAssign,
    #[serde(rename = "tickets.close")]
    TicketsClose,

    // User management
    #[serde(rename = "users.view")]
    UsersView,
    #[serde(rename = "users.create")]
    UsersCreate,
    #[serde(rename = "users.edit")]
    UsersEdit,
    #[serde(rename = "users.delete")]
    UsersDelete,

    // Company management
    #[serde(rename = "company.view")]
    CompanyView,
    #[serde(rename = "company.edit")]
    CompanyEdit,
    #[serde(rename = "company.agents.add")]
    CompanyAgentsAdd,
    #[serde(rename = "company.agents.remove")]
    CompanyAgentsRemove,
    #[serde(rename = "company.announcements.create")]
    CompanyAnnouncementsCreate,
    #[serde(rename = "company.announcements.edit")]
    CompanyAnnouncementsEdit,

    // Platform
    #[serde(rename = "system.analytics")]
    SystemAnalytics,
    #[serde(rename = "system.settings")]
    SystemSettings,
    #[serde(rename = "system.companies.manage")]
    SystemCompaniesManage,
    #[serde(rename = "system.companies.approve")]
    SystemCompaniesApprove,
    #[serde(rename = "system.companies.reject")]
    SystemCompaniesReject,

    // AI assistant
    #[serde(rename = "ai.assistant.access")]
    AiAssistantAccess,
}

impl Permission {
    pub const ALL: [Permission; 23] = [
        Permission::TicketsViewOwn,
        Permission::TicketsViewAll,
        Permission::TicketsCreate,
        Permission::TicketsRespondOwn,
        Permission::TicketsRespondAll,
        Permission::TicketsAssign,
        Permission::TicketsClose,
        Permission::UsersView,
        Permission::UsersCreate,
        Permission::UsersEdit,
        Permission::UsersDelete,
        Permission::CompanyView,
        Permission::CompanyEdit,
        Permission::CompanyAgentsAdd,
        Permission::CompanyAgentsRemove,
        Permission::CompanyAnnouncementsCreate,
        Permission::CompanyAnnouncementsEdit,
        Permission::SystemAnalytics,
        Permission::SystemSettings,
        Permission::SystemCompaniesManage,
        Permission::SystemCompaniesApprove,
        Permission::SystemCompaniesReject,
        Permission::AiAssistantAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::TicketsViewOwn => "tickets.view.own",
            Permission::TicketsViewAll => "tickets.view.all",
            Permission::TicketsCreate => "tickets.create",
            Permission::TicketsRespondOwn => "tickets.respond.own",
            Permission::TicketsRespondAll => "tickets.respond.all",
            Permission::TicketsAssign => "tickets.assign",
            Permission::TicketsClose => "tickets.close",
            Permission::UsersView => "users.view",
            Permission::UsersCreate => "users.create",
            Permission::UsersEdit => "users.edit",
            Permission::UsersDelete => "users.delete",
            Permission::CompanyView => "company.view",
            Permission::CompanyEdit => "company.edit",
            Permission::CompanyAgentsAdd => "company.agents.add",
            Permission::CompanyAgentsRemove => "company.agents.remove",
            Permission::CompanyAnnouncementsCreate => "company.announcements.create",
            Permission::CompanyAnnouncementsEdit => "company.announcements.edit",
            Permission::SystemAnalytics => "system.analytics",
            Permission::SystemSettings => "system.settings",
            Permission::SystemCompaniesManage => "system.companies.manage",
            Permission::SystemCompaniesApprove => "system.companies.approve",
            Permission::SystemCompaniesReject => "system.companies.reject",
            Permission::AiAssistantAccess => "ai.assistant.access",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

use Permission::*;

const USER_PERMISSIONS: &[Permission] = &[TicketsViewOwn, TicketsCreate, TicketsRespondOwn];

const AGENT_PERMISSIONS: &[Permission] = &[
    TicketsViewOwn,
    TicketsViewAll,
    TicketsRespondOwn,
    TicketsRespondAll,
    TicketsAssign,
    TicketsClose,
    AiAssistantAccess,
];

const COMPANY_PERMISSIONS: &[Permission] = &[
    TicketsViewOwn,
    TicketsViewAll,
    TicketsCreate,
    TicketsRespondOwn,
    TicketsRespondAll,
    TicketsAssign,
    TicketsClose,
    UsersView,
    UsersCreate,
    UsersEdit,
    CompanyView,
    CompanyEdit,
    CompanyAgentsAdd,
    CompanyAgentsRemove,
    CompanyAnnouncementsCreate,
    CompanyAnnouncementsEdit,
    SystemAnalytics,
    AiAssistantAccess,
];

// Platform admins only run the platform; they do not work tickets.
const ADMIN_PERMISSIONS: &[Permission] = &[
    SystemCompaniesManage,
    SystemCompaniesApprove,
    SystemCompaniesReject,
    SystemSettings,
    UsersView,
    CompanyView,
];

impl Role {
    /// The fixed permission set granted to this role.
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::User => USER_PERMISSIONS,
            Role::Agent => AGENT_PERMISSIONS,
            Role::Company => COMPANY_PERMISSIONS,
            Role::Admin => ADMIN_PERMISSIONS,
        }
    }
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    role.permissions().contains(&permission)
}

/// True when at least one of `permissions` is granted. Empty input is false.
pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(role, *p))
}

/// True when every one of `permissions` is granted. Empty input is true.
pub fn has_all_permissions(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| has_permission(role, *p))
}
