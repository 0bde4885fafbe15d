mod common;

use axum::http::{header, StatusCode};
use common::{get, json_body, login, post_json, send, spawn_app, text_body};
use serde_json::json;

#[tokio::test]
async fn anonymous_visitors_are_sent_to_login() {
    let app = spawn_app();

    for uri in ["/dashboard", "/api/tickets", "/api/admin/companies"] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/login", "{uri}");
    }
}

#[tokio::test]
async fn dashboard_shows_sections_by_permission() {
    let app = spawn_app();

    let cookie = login(&app, "agent@gmail.com").await;
    let html = text_body(send(&app, get("/dashboard", Some(&cookie))).await).await;
    assert!(html.contains("Ticket queue"));
    assert!(html.contains("AI assistant"));
    assert!(!html.contains("Company applications"));
    assert!(html.contains("Knowledge Base"));

    let cookie = login(&app, "admin@gmail.com").await;
    let html = text_body(send(&app, get("/dashboard", Some(&cookie))).await).await;
    assert!(html.contains("Company applications"));
    assert!(!html.contains("Ticket queue"));
    assert!(html.contains("Platform Admin"));
}

#[tokio::test]
async fn regular_user_lists_only_own_tickets() {
    let app = spawn_app();
    let cookie = login(&app, "user@gmail.com").await;

    let body = json_body(send(&app, get("/api/tickets", Some(&cookie))).await).await;

    let ids: Vec<&str> = body["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["TK-006", "TK-007", "TK-008"]);
    assert_eq!(body["stats"]["total"], 3);
}

#[tokio::test]
async fn agent_filters_company_tickets() {
    let app = spawn_app();
    let cookie = login(&app, "agent@gmail.com").await;

    let response = send(
        &app,
        get("/api/tickets?status=open&sort=priority", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let tickets = body["tickets"].as_array().unwrap();
    assert_eq!(tickets[0]["id"], "TK-005");
    assert!(tickets.iter().all(|t| t["status"] == "open"));
    // stats cover every visible ticket, not only the filtered page
    assert_eq!(body["stats"]["total"], 8);
    assert_eq!(body["stats"]["urgent"], 1);
}

#[tokio::test]
async fn platform_admin_cannot_read_tickets() {
    let app = spawn_app();
    let cookie = login(&app, "admin@gmail.com").await;

    let response = send(&app, get("/api/tickets", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "none of the accepted permissions are granted");
}

#[tokio::test]
async fn ticket_actions_follow_permissions() {
    let app = spawn_app();
    let user = login(&app, "user@gmail.com").await;
    let agent = login(&app, "agent@gmail.com").await;

    // users create, agents do not
    let response = send(
        &app,
        post_json(
            "/api/tickets",
            Some(&user),
            json!({ "subject": "VPN drops", "description": "Every hour", "priority": "high" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["id"], "TK-009");

    let response = send(
        &app,
        post_json(
            "/api/tickets",
            Some(&agent),
            json!({ "subject": "x", "description": "y" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // agents assign and close, users do not
    let response = send(
        &app,
        post_json(
            "/api/tickets/TK-007/assign",
            Some(&user),
            json!({ "agent": "María García" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &app,
        post_json(
            "/api/tickets/TK-007/assign",
            Some(&agent),
            json!({ "agent": "María García" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "pending");

    let response = send(
        &app,
        post_json("/api/tickets/TK-007/close", Some(&agent), json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        post_json("/api/tickets/TK-007/close", Some(&agent), json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn blank_ticket_is_rejected() {
    let app = spawn_app();
    let user = login(&app, "user@gmail.com").await;

    let payloads = [
        json!({ "subject": "", "description": "" }),
        json!({ "subject": "   ", "description": "Printer on floor 2 is jammed" }),
        json!({ "subject": "Printer jammed", "description": "\n\t " }),
    ];
    for payload in payloads {
        let response = send(&app, post_json("/api/tickets", Some(&user), payload.clone())).await;
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "{payload}"
        );
    }

    // nothing was filed, so the next ticket still gets the first free id
    let response = send(
        &app,
        post_json(
            "/api/tickets",
            Some(&user),
            json!({ "subject": "Printer jammed", "description": "Floor 2" }),
        ),
    )
    .await;
    assert_eq!(json_body(response).await["id"], "TK-009");
}

#[tokio::test]
async fn only_platform_admin_manages_applications() {
    let app = spawn_app();
    let company = login(&app, "empresa@gmail.com").await;
    let admin = login(&app, "super@gmail.com").await;

    let response = send(&app, get("/api/admin/companies", Some(&company))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &app,
        post_json("/api/admin/applications/APP-001/approve", Some(&company), json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &app,
        post_json("/api/admin/applications/APP-001/approve", Some(&admin), json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "TechStart Solutions");

    let response = send(
        &app,
        post_json("/api/admin/applications/APP-001/reject", Some(&admin), json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let overview = json_body(send(&app, get("/api/admin/companies", Some(&admin))).await).await;
    assert_eq!(overview["pending_applications"], 2);
    assert_eq!(overview["active_companies"], 3);
}

#[tokio::test]
async fn unknown_application_is_404() {
    let app = spawn_app();
    let admin = login(&app, "admin@gmail.com").await;

    let response = send(
        &app,
        post_json("/api/admin/applications/APP-404/reject", Some(&admin), json!({})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
