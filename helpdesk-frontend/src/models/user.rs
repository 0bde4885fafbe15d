use crate::access::{has_any_permission, has_permission, resolve_role, Permission, Role};
use serde::{Deserialize, Serialize};

/// The authenticated identity held for the duration of a browser session.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub company: String,
    pub role: Role,
}

impl CurrentUser {
    /// Builds the session user for a demo login.
    ///
    /// Known demo accounts get fixed profiles; any other address gets a
    /// generic profile named after its local part. The role always comes
    /// from [`resolve_role`].
    pub fn from_login(email: &str) -> Self {
        let role = resolve_role(email);

        let (id, name, company) = match email {
            "user@gmail.com" => ("1", "Juan Pérez", "UniValle"),
            "agent@gmail.com" => ("2", "María García", "UniValle"),
            "empresa@gmail.com" => ("3", "Carlos Company Admin", "UniValle"),
            "admin@gmail.com" | "super@gmail.com" => ("4", "Platform Admin", "Sistema"),
            _ => ("1", local_part(email), "UniValle"),
        };

        Self {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            company: company.to_string(),
            role,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        has_permission(self.role, permission)
    }

    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        has_any_permission(self.role, permissions)
    }

    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }

    /// Tenant host shown under the header, e.g. `univalle.midominio.online`.
    pub fn tenant_host(&self) -> String {
        format!("{}.midominio.online", self.company.to_lowercase())
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Public view of the current user and what they may do.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub is_logged_in: bool,
    pub user: Option<CurrentUser>,
    pub role_label: Option<&'static str>,
    pub permissions: Vec<Permission>,
}

impl From<Option<&CurrentUser>> for SessionInfo {
    fn from(user: Option<&CurrentUser>) -> Self {
        Self {
            is_logged_in: user.is_some(),
            user: user.cloned(),
            role_label: user.map(|u| u.role.label()),
            permissions: user
                .map(|u| u.role.permissions().to_vec())
                .unwrap_or_default(),
        }
    }
}
