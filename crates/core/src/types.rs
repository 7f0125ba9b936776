/// All primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC (`TIMESTAMPTZ`).
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Durations on tasks (estimated/actual time) are whole minutes.
pub type Minutes = i32;
