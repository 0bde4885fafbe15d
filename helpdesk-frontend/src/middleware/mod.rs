pub mod auth;
pub mod metrics;

pub use auth::require_access;
pub use metrics::metrics_middleware;
