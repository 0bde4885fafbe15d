use crate::models::{
    AssignTicketRequest, CurrentUser, NewReply, NewTicket, Ticket, TicketFilter,
    TicketListResponse, TicketStats,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use service_core::error::AppError;
use validator::Validate;

/// Visible tickets after filtering; stats cover everything the viewer can see.
pub async fn list_tickets(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(filter): Query<TicketFilter>,
) -> Json<TicketListResponse> {
    let visible = state.tickets.list(&user, &TicketFilter::default()).await;
    let tickets = state.tickets.list(&user, &filter).await;

    Json(TicketListResponse {
        stats: TicketStats::from_tickets(&visible),
        tickets,
    })
}

pub async fn get_ticket(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Ticket>, AppError> {
    Ok(Json(state.tickets.get(&user, &id).await?))
}

pub async fn create_ticket(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewTicket>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    payload.validate()?;
    let ticket = state.tickets.create(&user, payload).await;
    Ok((StatusCode::CREATED, Json(ticket)))
}

pub async fn assign_ticket(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<AssignTicketRequest>,
) -> Result<Json<Ticket>, AppError> {
    payload.validate()?;
    let ticket = state.tickets.assign(&user, &id, payload.agent).await?;
    tracing::info!(ticket_id = %id, agent = ?ticket.agent, by = %user.id, "Ticket assigned");
    Ok(Json(ticket))
}

pub async fn close_ticket(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Ticket>, AppError> {
    let ticket = state.tickets.close(&user, &id).await?;
    tracing::info!(ticket_id = %id, by = %user.id, "Ticket closed");
    Ok(Json(ticket))
}

/// Adds a message to the ticket conversation.
pub async fn reply_to_ticket(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<NewReply>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    payload.validate()?;
    let ticket = state
        .tickets
        .reply(&user, &id, payload.body.trim().to_string())
        .await?;
    tracing::info!(ticket_id = %id, by = %user.id, "Reply added");
    Ok((StatusCode::CREATED, Json(ticket)))
}
