//! Role-based access model: roles, permissions, the static grant table and
//! the access gate built on top of them.

pub mod gate;
pub mod permission;
pub mod role;

pub use gate::{AccessGate, Denial};
pub use permission::{
    has_all_permissions, has_any_permission, has_permission, Permission, UnknownPermission,
};
pub use role::{resolve_role, Role, UnknownRole};
