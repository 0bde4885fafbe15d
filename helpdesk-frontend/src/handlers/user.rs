use crate::access::{AccessGate, Permission};
use crate::models::{CurrentUser, SessionInfo};
use crate::navigation::{layout_for, Layout, HOME_PATH};
use crate::services::SessionContext;
use askama::Template;
use axum::{
    extract::Query,
    http::Uri,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: CurrentUser,
    pub layout: Layout,
    pub page_title: &'static str,
    pub show_ticket_tools: bool,
    pub show_assistant: bool,
    pub show_company_admin: bool,
    pub show_platform_admin: bool,
}

/// Renders any authenticated page inside the role-aware shell. The route's
/// gate has already admitted the user; the layout follows the request path.
pub async fn page_handler(
    Extension(user): Extension<CurrentUser>,
    uri: Uri,
) -> impl IntoResponse {
    let layout = layout_for(Some(&user), uri.path());
    let page_title = layout.page_title(uri.path());
    let viewer = Some(&user);

    let ticket_tools = AccessGate::new()
        .permissions([Permission::TicketsAssign, Permission::TicketsClose])
        .require_all(false);
    let company_admin = AccessGate::new().permissions([
        Permission::CompanyAgentsAdd,
        Permission::CompanyAnnouncementsCreate,
    ]);

    DashboardTemplate {
        show_ticket_tools: ticket_tools.allows(viewer),
        show_assistant: AccessGate::new()
            .permission(Permission::AiAssistantAccess)
            .allows(viewer),
        show_company_admin: company_admin.allows(viewer),
        show_platform_admin: AccessGate::admin_only().allows(viewer),
        page_title,
        layout,
        user,
    }
}

pub async fn me(context: SessionContext) -> Json<SessionInfo> {
    Json(SessionInfo::from(context.current_user()))
}

#[derive(Deserialize)]
pub struct NavigationQuery {
    pub path: Option<String>,
}

pub async fn navigation(
    context: SessionContext,
    Query(query): Query<NavigationQuery>,
) -> Json<Layout> {
    let path = query.path.as_deref().unwrap_or(HOME_PATH);
    Json(layout_for(context.current_user(), path))
}
