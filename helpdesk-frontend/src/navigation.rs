//! Role-based navigation: sidebar entries, active-link rules and which
//! side panels the authenticated layout shows for a path.

use crate::access::Role;
use crate::models::CurrentUser;
use serde::Serialize;

/// Where users land after logging in.
pub const HOME_PATH: &str = "/tickets";

/// Landing page per role. Platform admins hold no ticket permission, so
/// they start on the platform dashboard instead.
pub fn home_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/dashboard",
        Role::User | Role::Agent | Role::Company => HOME_PATH,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

const fn item(href: &'static str, label: &'static str) -> NavItem {
    NavItem { href, label }
}

const USER_ITEMS: &[NavItem] = &[
    item("/tickets", "My Tickets"),
    item("/announcements", "Announcements"),
    item("/help-center", "Help Center"),
    item("/profile", "Profile"),
    item("/settings", "Settings"),
];

const AGENT_ITEMS: &[NavItem] = &[
    item("/agent/dashboard", "Dashboard"),
    item("/tickets", "All Tickets"),
    item("/agent/assigned", "My Assigned"),
    item("/agent/knowledge", "Knowledge Base"),
    item("/profile", "Profile"),
    item("/settings", "Settings"),
];

const COMPANY_ITEMS: &[NavItem] = &[
    item("/empresa/dashboard", "Dashboard"),
    item("/empresa/all-tickets", "All Tickets"),
    item("/empresa/agents", "Manage Agents"),
    item("/empresa/announcements", "Announcements"),
    item("/empresa/help-management", "Help Articles"),
    item("/empresa/company", "Company Settings"),
];

const ADMIN_ITEMS: &[NavItem] = &[
    item("/admin/dashboard", "Platform Dashboard"),
    item("/admin/companies", "Company Applications"),
    item("/admin/users", "All Users"),
    item("/profile", "Profile"),
    item("/admin/system-settings", "System Settings"),
];

/// Sidebar entries for a role; anonymous visitors get the regular user list.
pub fn sidebar_items(role: Option<Role>) -> &'static [NavItem] {
    match role {
        Some(Role::Agent) => AGENT_ITEMS,
        Some(Role::Company) => COMPANY_ITEMS,
        Some(Role::Admin) => ADMIN_ITEMS,
        Some(Role::User) | None => USER_ITEMS,
    }
}

impl NavItem {
    pub fn is_active(&self, path: &str) -> bool {
        match self.href {
            "/tickets" => path.starts_with("/tickets") || path.starts_with("/create-ticket"),
            "/empresa/all-tickets" => {
                path.starts_with("/empresa/all-tickets") || path.starts_with("/tickets")
            }
            href => path.starts_with(href),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SidePanel {
    CreateTicket,
    Tickets,
}

impl SidePanel {
    pub fn title(&self) -> &'static str {
        match self {
            SidePanel::CreateTicket => "Ticket tips",
            SidePanel::Tickets => "Ticket views",
        }
    }
}

/// What the authenticated layout renders around a page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Layout {
    pub items: Vec<NavLink>,
    pub side_panel: Option<SidePanel>,
    pub show_new_ticket_button: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavLink {
    #[serde(flatten)]
    pub item: NavItem,
    pub active: bool,
}

pub fn layout_for(user: Option<&CurrentUser>, path: &str) -> Layout {
    let role = user.map(|u| u.role);
    let items = sidebar_items(role)
        .iter()
        .map(|item| NavLink {
            item: *item,
            active: item.is_active(path),
        })
        .collect();

    let on_tickets = path.starts_with("/tickets");
    let side_panel = if path.starts_with("/create-ticket") {
        Some(SidePanel::CreateTicket)
    } else {
        match role {
            Some(Role::User | Role::Agent) if on_tickets => Some(SidePanel::Tickets),
            Some(Role::Company) if path.starts_with("/empresa/all-tickets") => {
                Some(SidePanel::Tickets)
            }
            _ => None,
        }
    };

    Layout {
        items,
        side_panel,
        show_new_ticket_button: role == Some(Role::User) && on_tickets,
    }
}

impl Layout {
    /// Heading for the page: the active sidebar entry, or a fixed title for
    /// pages outside the sidebar.
    pub fn page_title(&self, path: &str) -> &'static str {
        if path.starts_with("/create-ticket") {
            return "New Ticket";
        }
        self.items
            .iter()
            .find(|link| link.active)
            .map_or("Dashboard", |link| link.item.label)
    }
}
