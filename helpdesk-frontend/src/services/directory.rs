//! Company members (requesters, agents and company admins), held in memory.

use super::error::StoreError;
use crate::access::{Permission, Role};
use crate::models::{CurrentUser, Member, MemberFilter, MemberStatus, MemberUpdate, NewMember};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

pub struct UserDirectory {
    inner: RwLock<Inner>,
}

struct Inner {
    members: Vec<Member>,
    next_id: u32,
}

impl UserDirectory {
    pub fn new(members: Vec<Member>) -> Self {
        let next_id = members
            .iter()
            .filter_map(|m| m.id.strip_prefix("USR-")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            inner: RwLock::new(Inner { members, next_id }),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_members(Utc::now()))
    }

    /// Members the viewer may see, in join order.
    ///
    /// Platform staff (`system.companies.manage`) see every company; everyone
    /// else only their own.
    pub async fn list(&self, viewer: &CurrentUser, filter: &MemberFilter) -> Vec<Member> {
        let inner = self.inner.read().await;
        inner
            .members
            .iter()
            .filter(|m| in_scope(m, viewer))
            .filter(|m| filter.matches(m))
            .cloned()
            .collect()
    }

    /// Adds a requester or agent to the viewer's company.
    ///
    /// Agents start as `pending` until they accept the invitation.
    pub async fn add(&self, viewer: &CurrentUser, new: NewMember) -> Result<Member, StoreError> {
        if !matches!(new.role, Role::User | Role::Agent) {
            return Err(StoreError::RoleNotAssignable(new.role));
        }

        let mut inner = self.inner.write().await;
        let email = new.email.trim().to_lowercase();
        if inner.members.iter().any(|m| m.email.eq_ignore_ascii_case(&email)) {
            return Err(StoreError::MemberAlreadyExists(email));
        }

        let member = Member {
            id: format!("USR-{:03}", inner.next_id),
            name: new.name.trim().to_string(),
            email,
            company: viewer.company.clone(),
            role: new.role,
            status: match new.role {
                Role::Agent => MemberStatus::Pending,
                _ => MemberStatus::Active,
            },
            joined_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.members.push(member.clone());

        tracing::info!(
            member_id = %member.id,
            role = %member.role,
            company = %member.company,
            by = %viewer.id,
            "Member added"
        );
        Ok(member)
    }

    pub async fn update(
        &self,
        viewer: &CurrentUser,
        id: &str,
        update: MemberUpdate,
    ) -> Result<Member, StoreError> {
        let mut inner = self.inner.write().await;
        let member = inner
            .members
            .iter_mut()
            .find(|m| m.id == id && in_scope(m, viewer))
            .ok_or_else(|| StoreError::MemberNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            member.name = name.trim().to_string();
        }
        if let Some(status) = update.status {
            member.status = status;
        }
        Ok(member.clone())
    }

    pub async fn remove(&self, viewer: &CurrentUser, id: &str) -> Result<Member, StoreError> {
        self.remove_where(viewer, id, |_| true).await
    }

    /// Removes an agent; other members are reported as not found.
    pub async fn remove_agent(&self, viewer: &CurrentUser, id: &str) -> Result<Member, StoreError> {
        self.remove_where(viewer, id, |m| m.role == Role::Agent).await
    }

    async fn remove_where(
        &self,
        viewer: &CurrentUser,
        id: &str,
        allowed: impl Fn(&Member) -> bool,
    ) -> Result<Member, StoreError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .members
            .iter()
            .position(|m| m.id == id && in_scope(m, viewer) && allowed(m))
            .ok_or_else(|| StoreError::MemberNotFound(id.to_string()))?;
        let member = inner.members.remove(index);

        tracing::info!(member_id = %member.id, by = %viewer.id, "Member removed");
        Ok(member)
    }
}

fn in_scope(member: &Member, viewer: &CurrentUser) -> bool {
    viewer.has_permission(Permission::SystemCompaniesManage) || member.company == viewer.company
}

fn seed_members(now: DateTime<Utc>) -> Vec<Member> {
    let seed = |id: &str,
                name: &str,
                email: &str,
                company: &str,
                role: Role,
                status: MemberStatus,
                age_days: i64| Member {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        company: company.to_string(),
        role,
        status,
        joined_at: now - Duration::days(age_days),
    };

    vec![
        seed("USR-001", "Juan Pérez", "user@gmail.com", "UniValle", Role::User, MemberStatus::Active, 300),
        seed("USR-002", "María García", "agent@gmail.com", "UniValle", Role::Agent, MemberStatus::Active, 280),
        seed("USR-003", "Carlos Company Admin", "empresa@gmail.com", "UniValle", Role::Company, MemberStatus::Active, 400),
        seed("USR-004", "Sarah Johnson", "sarah.johnson@univalle.edu", "UniValle", Role::Agent, MemberStatus::Active, 120),
        seed("USR-005", "David Kim", "david.kim@univalle.edu", "UniValle", Role::Agent, MemberStatus::Pending, 3),
        seed("USR-006", "Platform Admin", "admin@gmail.com", "Sistema", Role::Admin, MemberStatus::Active, 500),
        seed("USR-007", "Mike Davis", "mike@retailmax.com", "RetailMax", Role::User, MemberStatus::Active, 90),
        seed("USR-008", "Bob Wilson", "bob@retailmax.com", "RetailMax", Role::Agent, MemberStatus::Inactive, 150),
    ]
}
