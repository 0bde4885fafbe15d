use crate::access::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::validation::not_blank;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    Pending,
    OnHold,
    Solved,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: String,
    pub company: String,
    pub requester: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub agent: Option<String>,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<TicketReply>,
}

/// One message in a ticket conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketReply {
    pub author: String,
    pub role: Role,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketSort {
    #[default]
    Newest,
    Oldest,
    Priority,
}

/// Query-string filter for ticket lists. Absent fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilter {
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub agent: Option<String>,
    #[serde(default)]
    pub sort: TicketSort,
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                ticket.subject.to_lowercase().contains(&term)
                    || ticket.requester.to_lowercase().contains(&term)
                    || ticket.id.to_lowercase().contains(&term)
            }
        };

        matches_search
            && self.status.map_or(true, |s| ticket.status == s)
            && self.priority.map_or(true, |p| ticket.priority == p)
            && self
                .agent
                .as_deref()
                .map_or(true, |a| ticket.agent.as_deref() == Some(a))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewTicket {
    #[validate(
        length(min = 1, max = 200, message = "Subject is required"),
        custom(function = "not_blank")
    )]
    pub subject: String,
    #[validate(
        length(min = 1, message = "Description is required"),
        custom(function = "not_blank")
    )]
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: TicketPriority,
}

fn default_priority() -> TicketPriority {
    TicketPriority::Medium
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssignTicketRequest {
    #[validate(
        length(min = 1, message = "Agent name is required"),
        custom(function = "not_blank")
    )]
    pub agent: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewReply {
    #[validate(
        length(min = 1, max = 5000, message = "Reply text is required"),
        custom(function = "not_blank")
    )]
    pub body: String,
}

/// Counters shown above ticket lists.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub pending: usize,
    pub on_hold: usize,
    pub solved: usize,
    pub closed: usize,
    pub urgent: usize,
}

impl TicketStats {
    pub fn from_tickets<'a>(tickets: impl IntoIterator<Item = &'a Ticket>) -> Self {
        tickets.into_iter().fold(Self::default(), |mut stats, t| {
            stats.total += 1;
            match t.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::Pending => stats.pending += 1,
                TicketStatus::OnHold => stats.on_hold += 1,
                TicketStatus::Solved => stats.solved += 1,
                TicketStatus::Closed => stats.closed += 1,
            }
            if t.priority == TicketPriority::Urgent {
                stats.urgent += 1;
            }
            stats
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TicketListResponse {
    pub tickets: Vec<Ticket>,
    pub stats: TicketStats,
}
