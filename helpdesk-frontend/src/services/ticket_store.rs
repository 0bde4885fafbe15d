//! In-memory ticket store seeded with demo data.

use super::error::StoreError;
use crate::access::Permission;
use crate::models::{
    CurrentUser, NewTicket, Ticket, TicketFilter, TicketPriority, TicketReply, TicketSort,
    TicketStatus,
};
use chrono::{DateTime, Duration, Utc};
use std::cmp::Reverse;
use tokio::sync::RwLock;

pub struct TicketStore {
    inner: RwLock<Inner>,
}

struct Inner {
    tickets: Vec<Ticket>,
    next_id: u32,
}

impl TicketStore {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        let next_id = tickets
            .iter()
            .filter_map(|t| t.id.strip_prefix("TK-")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            inner: RwLock::new(Inner { tickets, next_id }),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_tickets(Utc::now()))
    }

    /// Tickets the viewer may see, filtered and sorted.
    ///
    /// `tickets.view.all` sees the whole company; `tickets.view.own` only
    /// the viewer's own requests.
    pub async fn list(&self, viewer: &CurrentUser, filter: &TicketFilter) -> Vec<Ticket> {
        let inner = self.inner.read().await;
        let mut tickets: Vec<Ticket> = inner
            .tickets
            .iter()
            .filter(|t| is_visible_to(t, viewer))
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        sort_tickets(&mut tickets, filter.sort);
        tickets
    }

    pub async fn get(&self, viewer: &CurrentUser, id: &str) -> Result<Ticket, StoreError> {
        let inner = self.inner.read().await;
        inner
            .tickets
            .iter()
            .find(|t| t.id == id && is_visible_to(t, viewer))
            .cloned()
            .ok_or_else(|| StoreError::TicketNotFound(id.to_string()))
    }

    pub async fn create(&self, requester: &CurrentUser, new: NewTicket) -> Ticket {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let ticket = Ticket {
            id: format!("TK-{:03}", inner.next_id),
            company: requester.company.clone(),
            requester: requester.name.clone(),
            email: requester.email.clone(),
            subject: new.subject,
            description: new.description,
            agent: None,
            status: TicketStatus::Open,
            priority: new.priority,
            created_at: now,
            updated_at: now,
            replies: Vec::new(),
        };
        inner.next_id += 1;
        inner.tickets.push(ticket.clone());

        tracing::info!(ticket_id = %ticket.id, requester = %requester.email, "Ticket created");
        ticket
    }

    pub async fn assign(
        &self,
        viewer: &CurrentUser,
        id: &str,
        agent: String,
    ) -> Result<Ticket, StoreError> {
        self.update(viewer, id, |ticket| {
            ticket.agent = Some(agent);
            if ticket.status == TicketStatus::Open {
                ticket.status = TicketStatus::Pending;
            }
            Ok(())
        })
        .await
    }

    pub async fn close(&self, viewer: &CurrentUser, id: &str) -> Result<Ticket, StoreError> {
        self.update(viewer, id, |ticket| {
            if ticket.status == TicketStatus::Closed {
                return Err(StoreError::TicketAlreadyClosed(ticket.id.clone()));
            }
            ticket.status = TicketStatus::Closed;
            Ok(())
        })
        .await
    }

    /// Appends a reply to the ticket conversation.
    ///
    /// `tickets.respond.all` may answer any ticket of the viewer's company;
    /// `tickets.respond.own` only the viewer's own requests.
    pub async fn reply(
        &self,
        viewer: &CurrentUser,
        id: &str,
        body: String,
    ) -> Result<Ticket, StoreError> {
        self.update(viewer, id, |ticket| {
            if !can_respond(ticket, viewer) {
                return Err(StoreError::ReplyNotAllowed(ticket.id.clone()));
            }
            if ticket.status == TicketStatus::Closed {
                return Err(StoreError::TicketAlreadyClosed(ticket.id.clone()));
            }
            ticket.replies.push(TicketReply {
                author: viewer.name.clone(),
                role: viewer.role,
                body,
                created_at: Utc::now(),
            });
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        viewer: &CurrentUser,
        id: &str,
        change: impl FnOnce(&mut Ticket) -> Result<(), StoreError>,
    ) -> Result<Ticket, StoreError> {
        let mut inner = self.inner.write().await;
        let ticket = inner
            .tickets
            .iter_mut()
            .find(|t| t.id == id && is_visible_to(t, viewer))
            .ok_or_else(|| StoreError::TicketNotFound(id.to_string()))?;
        change(ticket)?;
        ticket.updated_at = Utc::now();
        Ok(ticket.clone())
    }
}

fn is_visible_to(ticket: &Ticket, viewer: &CurrentUser) -> bool {
    if viewer.has_permission(Permission::TicketsViewAll) {
        ticket.company == viewer.company
    } else if viewer.has_permission(Permission::TicketsViewOwn) {
        ticket.email == viewer.email
    } else {
        false
    }
}

fn can_respond(ticket: &Ticket, viewer: &CurrentUser) -> bool {
    (viewer.has_permission(Permission::TicketsRespondAll) && ticket.company == viewer.company)
        || (viewer.has_permission(Permission::TicketsRespondOwn) && ticket.email == viewer.email)
}

fn sort_tickets(tickets: &mut [Ticket], sort: TicketSort) {
    match sort {
        TicketSort::Newest => tickets.sort_by_key(|t| Reverse(t.created_at)),
        TicketSort::Oldest => tickets.sort_by_key(|t| t.created_at),
        TicketSort::Priority => {
            tickets.sort_by_key(|t| (Reverse(t.priority), Reverse(t.created_at)))
        }
    }
}

fn seed_tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    let seed = |id: &str,
                requester: &str,
                email: &str,
                subject: &str,
                agent: Option<&str>,
                status: TicketStatus,
                priority: TicketPriority,
                age: Duration| Ticket {
        id: id.to_string(),
        company: "UniValle".to_string(),
        requester: requester.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        description: format!("{subject} (reported by {requester})"),
        agent: agent.map(str::to_string),
        status,
        priority,
        created_at: now - age,
        updated_at: now - age,
        replies: Vec::new(),
    };

    vec![
        seed(
            "TK-001",
            "Bettina Webb",
            "bettina@mail.com",
            "Chat follow-up - iOS",
            Some("Jonah Meadow"),
            TicketStatus::Open,
            TicketPriority::High,
            Duration::minutes(2),
        ),
        seed(
            "TK-002",
            "Bart Tuna",
            "bart@mail.com",
            "Support needed",
            Some("Linda Breach"),
            TicketStatus::Closed,
            TicketPriority::Medium,
            Duration::minutes(9),
        ),
        seed(
            "TK-003",
            "Mark Stone",
            "mark@mail.com",
            "Wrong size of T-shirt",
            Some("Mike Benson"),
            TicketStatus::Open,
            TicketPriority::Low,
            Duration::hours(1),
        ),
        seed(
            "TK-004",
            "Gregory Contra",
            "gregory@mail.com",
            "Issue with prechat form",
            Some("Jonah Meadow"),
            TicketStatus::Solved,
            TicketPriority::Medium,
            Duration::days(3),
        ),
        seed(
            "TK-005",
            "Linda Karlson",
            "linda@mail.com",
            "Browser support",
            None,
            TicketStatus::Open,
            TicketPriority::Urgent,
            Duration::days(4),
        ),
        seed(
            "TK-006",
            "Juan Pérez",
            "user@gmail.com",
            "Cannot access course portal",
            Some("María García"),
            TicketStatus::Pending,
            TicketPriority::High,
            Duration::hours(5),
        ),
        seed(
            "TK-007",
            "Juan Pérez",
            "user@gmail.com",
            "Password reset email never arrives",
            None,
            TicketStatus::Open,
            TicketPriority::Medium,
            Duration::days(1),
        ),
        seed(
            "TK-008",
            "Juan Pérez",
            "user@gmail.com",
            "Invoice shows wrong address",
            Some("María García"),
            TicketStatus::Solved,
            TicketPriority::Low,
            Duration::days(12),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TicketStore {
        TicketStore::new(seed_tickets(Utc::now()))
    }

    fn ids(tickets: &[Ticket]) -> Vec<&str> {
        tickets.iter().map(|t| t.id.as_str()).collect()
    }

    #[tokio::test]
    async fn regular_user_sees_only_own_tickets() {
        let viewer = CurrentUser::from_login("user@gmail.com");
        let tickets = store().list(&viewer, &TicketFilter::default()).await;
        assert_eq!(ids(&tickets), vec!["TK-006", "TK-007", "TK-008"]);
    }

    #[tokio::test]
    async fn agent_sees_whole_company() {
        let viewer = CurrentUser::from_login("agent@gmail.com");
        let tickets = store().list(&viewer, &TicketFilter::default()).await;
        assert_eq!(tickets.len(), 8);
    }

    #[tokio::test]
    async fn other_company_sees_nothing() {
        let mut viewer = CurrentUser::from_login("agent@gmail.com");
        viewer.company = "Acme".to_string();
        assert!(store().list(&viewer, &TicketFilter::default()).await.is_empty());
    }

    #[tokio::test]
    async fn platform_admin_has_no_ticket_visibility() {
        let viewer = CurrentUser::from_login("admin@gmail.com");
        assert!(store().list(&viewer, &TicketFilter::default()).await.is_empty());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_over_subject_requester_and_id() {
        let viewer = CurrentUser::from_login("empresa@gmail.com");
        let store = store();

        let by_subject = TicketFilter {
            search: Some("BROWSER".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&store.list(&viewer, &by_subject).await), vec!["TK-005"]);

        let by_requester = TicketFilter {
            search: Some("stone".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&store.list(&viewer, &by_requester).await), vec!["TK-003"]);

        let by_id = TicketFilter {
            search: Some("tk-002".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&store.list(&viewer, &by_id).await), vec!["TK-002"]);
    }

    #[tokio::test]
    async fn filters_combine() {
        let viewer = CurrentUser::from_login("empresa@gmail.com");
        let filter = TicketFilter {
            status: Some(TicketStatus::Open),
            agent: Some("Jonah Meadow".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&store().list(&viewer, &filter).await), vec!["TK-001"]);
    }

    #[tokio::test]
    async fn priority_sort_puts_urgent_first() {
        let viewer = CurrentUser::from_login("empresa@gmail.com");
        let filter = TicketFilter {
            sort: TicketSort::Priority,
            ..Default::default()
        };
        let tickets = store().list(&viewer, &filter).await;
        assert_eq!(tickets[0].id, "TK-005");
        assert_eq!(tickets[1].id, "TK-001");
        assert_eq!(tickets[2].id, "TK-006");
    }

    #[tokio::test]
    async fn oldest_sort_reverses_default() {
        let viewer = CurrentUser::from_login("empresa@gmail.com");
        let filter = TicketFilter {
            sort: TicketSort::Oldest,
            ..Default::default()
        };
        let tickets = store().list(&viewer, &filter).await;
        assert_eq!(tickets.first().map(|t| t.id.as_str()), Some("TK-008"));
        assert_eq!(tickets.last().map(|t| t.id.as_str()), Some("TK-001"));
    }

    #[tokio::test]
    async fn create_assigns_next_id_and_requester() {
        let store = store();
        let viewer = CurrentUser::from_login("user@gmail.com");
        let ticket = store
            .create(
                &viewer,
                NewTicket {
                    subject: "Printer on fire".to_string(),
                    description: "Third floor".to_string(),
                    priority: TicketPriority::Urgent,
                },
            )
            .await;

        assert_eq!(ticket.id, "TK-009");
        assert_eq!(ticket.requester, "Juan Pérez");
        assert_eq!(ticket.status, TicketStatus::Open);
        assert!(store.get(&viewer, "TK-009").await.is_ok());
    }

    #[tokio::test]
    async fn assign_moves_open_ticket_to_pending() {
        let viewer = CurrentUser::from_login("agent@gmail.com");
        let ticket = store()
            .assign(&viewer, "TK-005", "María García".to_string())
            .await
            .unwrap();
        assert_eq!(ticket.agent.as_deref(), Some("María García"));
        assert_eq!(ticket.status, TicketStatus::Pending);
    }

    #[tokio::test]
    async fn closing_twice_conflicts() {
        let store = store();
        let viewer = CurrentUser::from_login("agent@gmail.com");
        store.close(&viewer, "TK-001").await.unwrap();
        assert_eq!(
            store.close(&viewer, "TK-001").await,
            Err(StoreError::TicketAlreadyClosed("TK-001".to_string()))
        );
    }

    #[tokio::test]
    async fn requester_and_agent_share_the_conversation() {
        let store = store();
        let user = CurrentUser::from_login("user@gmail.com");
        let agent = CurrentUser::from_login("agent@gmail.com");

        store
            .reply(&user, "TK-007", "Still nothing in my inbox".to_string())
            .await
            .unwrap();
        let ticket = store
            .reply(&agent, "TK-007", "Resent from the admin console".to_string())
            .await
            .unwrap();

        let authors: Vec<&str> = ticket.replies.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(authors, vec!["Juan Pérez", "María García"]);
        assert_eq!(ticket.replies[1].role, crate::access::Role::Agent);
    }

    #[tokio::test]
    async fn closed_ticket_takes_no_replies() {
        let agent = CurrentUser::from_login("agent@gmail.com");
        assert_eq!(
            store().reply(&agent, "TK-002", "Any update?".to_string()).await,
            Err(StoreError::TicketAlreadyClosed("TK-002".to_string()))
        );
    }

    #[test]
    fn respond_own_is_limited_to_own_requests() {
        let tickets = seed_tickets(Utc::now());
        let user = CurrentUser::from_login("user@gmail.com");
        let others = tickets.iter().find(|t| t.id == "TK-001").unwrap();
        let own = tickets.iter().find(|t| t.id == "TK-006").unwrap();

        assert!(can_respond(own, &user));
        assert!(!can_respond(others, &user));
    }

    #[test]
    fn respond_all_is_limited_to_own_company() {
        let tickets = seed_tickets(Utc::now());
        let mut agent = CurrentUser::from_login("agent@gmail.com");
        assert!(tickets.iter().all(|t| can_respond(t, &agent)));

        agent.company = "Acme".to_string();
        assert!(!tickets.iter().any(|t| can_respond(t, &agent)));

        let admin = CurrentUser::from_login("admin@gmail.com");
        assert!(!tickets.iter().any(|t| can_respond(t, &admin)));
    }

    #[tokio::test]
    async fn invisible_ticket_is_not_found() {
        let viewer = CurrentUser::from_login("user@gmail.com");
        assert_eq!(
            store().get(&viewer, "TK-001").await,
            Err(StoreError::TicketNotFound("TK-001".to_string()))
        );
    }
}
