use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post, MethodRouter},
    Router,
};
use service_core::middleware::{
    request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::access::{AccessGate, Permission, Role};
use crate::config::SessionSettings;
use crate::handlers::{
    admin::{approve_application, companies_overview, reject_application},
    announcements::{edit_announcement, list_announcements, publish_announcement},
    app::{health_check, index},
    auth::{login_handler, login_page, logout_handler, register_handler, register_page},
    company::{company_settings, update_company_settings},
    members::{
        create_member, delete_member, invite_agent, list_agents, list_members, remove_agent,
        update_member,
    },
    tickets::{
        assign_ticket, close_ticket, create_ticket, get_ticket, list_tickets, reply_to_ticket,
    },
    user::{me, navigation, page_handler},
};
use crate::middleware::{metrics_middleware, require_access};
use crate::AppState;

/// Runs `gate` in front of `route`.
fn guard(route: MethodRouter<AppState>, gate: AccessGate) -> MethodRouter<AppState> {
    route.layer(from_fn_with_state(gate, require_access))
}

fn signed_in() -> AccessGate {
    AccessGate::new()
}

fn ticket_viewer() -> AccessGate {
    AccessGate::new()
        .permissions([Permission::TicketsViewOwn, Permission::TicketsViewAll])
        .require_all(false)
}

fn company_admin() -> AccessGate {
    AccessGate::new().role(Role::Company)
}

/// Server-rendered pages, each behind the gate for its section.
fn page_routes() -> Router<AppState> {
    let pages = [
        ("/dashboard", signed_in()),
        ("/tickets", ticket_viewer()),
        ("/tickets/:id", ticket_viewer()),
        (
            "/create-ticket",
            AccessGate::new().permission(Permission::TicketsCreate),
        ),
        ("/announcements", signed_in()),
        ("/help-center", signed_in()),
        ("/profile", signed_in()),
        ("/settings", signed_in()),
        ("/agent/dashboard", AccessGate::agent_only()),
        ("/agent/assigned", AccessGate::agent_only()),
        ("/agent/knowledge", AccessGate::agent_only()),
        ("/empresa/dashboard", company_admin()),
        (
            "/empresa/all-tickets",
            company_admin().permission(Permission::TicketsViewAll),
        ),
        (
            "/empresa/agents",
            company_admin()
                .permissions([Permission::CompanyAgentsAdd, Permission::CompanyAgentsRemove])
                .require_all(false),
        ),
        (
            "/empresa/announcements",
            company_admin().permission(Permission::CompanyAnnouncementsCreate),
        ),
        ("/empresa/help-management", company_admin()),
        (
            "/empresa/company",
            company_admin().permission(Permission::CompanyEdit),
        ),
        (
            "/empresa/performance",
            company_admin().permission(Permission::SystemAnalytics),
        ),
        ("/admin/dashboard", AccessGate::admin_only()),
        (
            "/admin/companies",
            AccessGate::admin_only().permission(Permission::SystemCompaniesManage),
        ),
        (
            "/admin/users",
            AccessGate::admin_only().permission(Permission::UsersView),
        ),
        (
            "/admin/system-settings",
            AccessGate::admin_only().permission(Permission::SystemSettings),
        ),
    ];

    pages
        .into_iter()
        .fold(Router::new(), |router, (path, gate)| {
            router.route(path, guard(get(page_handler), gate))
        })
}

fn api_routes() -> Router<AppState> {
    let gate = |permission| AccessGate::new().permission(permission);

    Router::new()
        .route("/api/me", get(me))
        .route("/api/navigation", get(navigation))
        .route(
            "/api/tickets",
            guard(get(list_tickets), ticket_viewer())
                .merge(guard(post(create_ticket), gate(Permission::TicketsCreate))),
        )
        .route("/api/tickets/:id", guard(get(get_ticket), ticket_viewer()))
        .route(
            "/api/tickets/:id/assign",
            guard(post(assign_ticket), gate(Permission::TicketsAssign)),
        )
        .route(
            "/api/tickets/:id/close",
            guard(post(close_ticket), gate(Permission::TicketsClose)),
        )
        .route(
            "/api/tickets/:id/replies",
            guard(
                post(reply_to_ticket),
                AccessGate::new()
                    .permissions([Permission::TicketsRespondOwn, Permission::TicketsRespondAll])
                    .require_all(false),
            ),
        )
        .route(
            "/api/users",
            guard(get(list_members), gate(Permission::UsersView))
                .merge(guard(post(create_member), gate(Permission::UsersCreate))),
        )
        .route(
            "/api/users/:id",
            guard(
                patch(update_member),
                gate(Permission::UsersEdit),
            )
            .merge(guard(
                delete(delete_member),
                gate(Permission::UsersDelete),
            )),
        )
        .route(
            "/api/company",
            guard(get(company_settings), gate(Permission::CompanyView)).merge(guard(
                patch(update_company_settings),
                gate(Permission::CompanyEdit),
            )),
        )
        .route(
            "/api/company/agents",
            guard(get(list_agents), gate(Permission::CompanyView))
                .merge(guard(post(invite_agent), gate(Permission::CompanyAgentsAdd))),
        )
        .route(
            "/api/company/agents/:id",
            guard(
                delete(remove_agent),
                gate(Permission::CompanyAgentsRemove),
            ),
        )
        .route(
            "/api/announcements",
            guard(get(list_announcements), signed_in()).merge(guard(
                post(publish_announcement),
                gate(Permission::CompanyAnnouncementsCreate),
            )),
        )
        .route(
            "/api/announcements/:id",
            guard(
                patch(edit_announcement),
                gate(Permission::CompanyAnnouncementsEdit),
            ),
        )
        .route(
            "/api/admin/companies",
            guard(
                get(companies_overview),
                AccessGate::admin_only().permission(Permission::SystemCompaniesManage),
            ),
        )
        .route(
            "/api/admin/applications/:id/approve",
            guard(
                post(approve_application),
                gate(Permission::SystemCompaniesApprove),
            ),
        )
        .route(
            "/api/admin/applications/:id/reject",
            guard(
                post(reject_application),
                gate(Permission::SystemCompaniesReject),
            ),
        )
}

pub fn build_router(state: AppState, session: &SessionSettings, static_dir: &str) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(session.secure_cookie)
        .with_expiry(Expiry::OnInactivity(session.expiry()));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(crate::handlers::metrics::metrics))
        .route("/login", get(login_page).post(login_handler))
        .route("/register", get(register_page).post(register_handler))
        .route("/logout", post(logout_handler))
        .merge(page_routes())
        .merge(api_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
}
