//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Methods that take part in a larger write
//! accept `&mut PgConnection` instead so callers can pass a transaction.

pub mod project_member_repo;
pub mod project_repo;
pub mod reminder_repo;
pub mod task_relation_repo;
pub mod task_repo;
pub mod user_repo;

pub use project_member_repo::ProjectMemberRepo;
pub use project_repo::ProjectRepo;
pub use reminder_repo::ReminderRepo;
pub use task_relation_repo::TaskRelationRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
