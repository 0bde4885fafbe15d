pub mod admin;
pub mod announcements;
pub mod app;
pub mod auth;
pub mod company;
pub mod members;
pub mod metrics;
pub mod tickets;
pub mod user;
