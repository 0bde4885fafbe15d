use crate::access::Role;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Ticket {0} not found")]
    TicketNotFound(String),

    #[error("Ticket {0} is already closed")]
    TicketAlreadyClosed(String),

    #[error("Not allowed to reply on ticket {0}")]
    ReplyNotAllowed(String),

    #[error("Application {0} not found")]
    ApplicationNotFound(String),

    #[error("Application {0} has already been decided")]
    ApplicationAlreadyDecided(String),

    #[error("A company named {0} is already registered")]
    CompanyAlreadyRegistered(String),

    #[error("Company {0} not found")]
    CompanyNotFound(String),

    #[error("Member {0} not found")]
    MemberNotFound(String),

    #[error("A member with email {0} already exists")]
    MemberAlreadyExists(String),

    #[error("Members cannot be given the {0} role")]
    RoleNotAssignable(Role),

    #[error("Announcement {0} not found")]
    AnnouncementNotFound(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TicketNotFound(_)
            | StoreError::ApplicationNotFound(_)
            | StoreError::CompanyNotFound(_)
            | StoreError::MemberNotFound(_)
            | StoreError::AnnouncementNotFound(_) => AppError::NotFound(anyhow::anyhow!(err)),
            StoreError::ReplyNotAllowed(_) | StoreError::RoleNotAssignable(_) => {
                AppError::Forbidden(anyhow::anyhow!(err))
            }
            StoreError::TicketAlreadyClosed(_)
            | StoreError::ApplicationAlreadyDecided(_)
            | StoreError::CompanyAlreadyRegistered(_)
            | StoreError::MemberAlreadyExists(_) => AppError::Conflict(anyhow::anyhow!(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn store_errors_map_to_http_status() {
        let cases = [
            (StoreError::MemberNotFound("USR-9".into()), StatusCode::NOT_FOUND),
            (StoreError::ReplyNotAllowed("TK-1".into()), StatusCode::FORBIDDEN),
            (StoreError::RoleNotAssignable(Role::Admin), StatusCode::FORBIDDEN),
            (
                StoreError::MemberAlreadyExists("a@b.c".into()),
                StatusCode::CONFLICT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }
}
