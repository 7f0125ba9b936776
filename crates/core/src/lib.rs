//! Domain types and pure helpers for the taskflow backend.
//!
//! Nothing in here touches the database or the network, so it is shared by
//! the repository layer, the assist gateway and the HTTP server alike.

pub mod error;
pub mod filters;
pub mod pagination;
pub mod patch;
pub mod reminders;
pub mod types;
pub mod validation;
