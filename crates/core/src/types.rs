/// All entity primary keys are UUIDs (v7, time-ordered, generated in Rust).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh primary key.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}
