mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{get, json_body, login, send, session_cookie, spawn_app, text_body};

/// Logs in and returns the `HX-Redirect` target with the session cookie.
async fn login_redirect(app: &axum::Router, email: &str) -> (String, String) {
    let response = send(
        app,
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!(
                "email={}&password=secret",
                email.replace('@', "%40")
            )))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let target = response.headers()["HX-Redirect"]
        .to_str()
        .unwrap()
        .to_string();
    (target, session_cookie(&response).unwrap())
}

fn title_of(html: &str) -> &str {
    let start = html.find("<title>").unwrap() + "<title>".len();
    let end = html.find(" | HELPDESK</title>").unwrap();
    &html[start..end]
}

#[tokio::test]
async fn login_redirect_lands_on_a_rendered_page() {
    let app = spawn_app();

    let cases = [
        ("user@gmail.com", "/tickets", "My Tickets"),
        ("agent@gmail.com", "/tickets", "All Tickets"),
        ("empresa@gmail.com", "/tickets", "All Tickets"),
        ("admin@gmail.com", "/admin/dashboard", "Platform Dashboard"),
    ];
    for (email, expected_target, expected_title) in cases {
        let (target, cookie) = login_redirect(&app, email).await;
        assert_eq!(target, expected_target, "{email}");

        let response = send(&app, get(&target, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK, "{email} -> {target}");
        let html = text_body(response).await;
        assert_eq!(title_of(&html), expected_title, "{email}");
    }
}

#[tokio::test]
async fn sidebar_links_resolve_for_every_role() {
    let app = spawn_app();

    for email in [
        "user@gmail.com",
        "agent@gmail.com",
        "empresa@gmail.com",
        "admin@gmail.com",
    ] {
        let cookie = login(&app, email).await;
        let nav = json_body(send(&app, get("/api/navigation", Some(&cookie))).await).await;

        for item in nav["items"].as_array().unwrap() {
            let href = item["href"].as_str().unwrap();
            let response = send(&app, get(href, Some(&cookie))).await;
            assert_eq!(response.status(), StatusCode::OK, "{email} -> {href}");
            let html = text_body(response).await;
            assert_eq!(title_of(&html), item["label"], "{email} -> {href}");
        }
    }
}

#[tokio::test]
async fn create_ticket_page_for_requesters() {
    let app = spawn_app();

    let cookie = login(&app, "user@gmail.com").await;
    let response = send(&app, get("/create-ticket", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert_eq!(title_of(&html), "New Ticket");
    assert!(html.contains("Ticket tips"));

    // Agents cannot open tickets
    let cookie = login(&app, "agent@gmail.com").await;
    let response = send(&app, get("/create-ticket", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ticket_pages_show_the_side_panel_and_new_ticket_button() {
    let app = spawn_app();
    let cookie = login(&app, "user@gmail.com").await;

    let html = text_body(send(&app, get("/tickets/TK-007", Some(&cookie))).await).await;
    assert_eq!(title_of(&html), "My Tickets");
    assert!(html.contains("Ticket views"));
    assert!(html.contains("href=\"/create-ticket\""));
}

#[tokio::test]
async fn sections_of_other_roles_are_forbidden() {
    let app = spawn_app();

    let cases = [
        ("user@gmail.com", "/admin/dashboard"),
        ("user@gmail.com", "/agent/assigned"),
        ("agent@gmail.com", "/empresa/agents"),
        ("empresa@gmail.com", "/admin/companies"),
        ("admin@gmail.com", "/tickets"),
        ("admin@gmail.com", "/empresa/dashboard"),
    ];
    for (email, uri) in cases {
        let cookie = login(&app, email).await;
        let response = send(&app, get(uri, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{email} -> {uri}");
    }
}

#[tokio::test]
async fn anonymous_page_visits_go_to_login() {
    let app = spawn_app();

    for uri in ["/tickets", "/create-ticket", "/empresa/agents", "/admin/dashboard"] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/login", "{uri}");
    }
}
