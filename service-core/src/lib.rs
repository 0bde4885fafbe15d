//! service-core: Shared infrastructure for the helpdesk web services.
pub mod error;
pub mod middleware;
pub mod observability;
