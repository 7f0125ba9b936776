//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create/update DTOs where the entity is writable here
//! - Response shapes that embed related summaries

pub mod attachment;
pub mod comment;
pub mod dependency;
pub mod project;
pub mod project_member;
pub mod reminder;
pub mod status;
pub mod task;
pub mod time_entry;
pub mod user;
