//! Repository layer: zero-sized structs with async CRUD methods.
//!
//! Each repository takes `&PgPool` (or a transaction connection for
//! multi-statement work) and returns `Result<_, sqlx::Error>`.

pub mod account_repo;
pub mod backup_repo;
pub mod canvas_repo;
pub mod canvas_version_repo;
pub mod session_repo;
pub mod user_repo;

pub use account_repo::AccountRepo;
pub use backup_repo::BackupRepo;
pub use canvas_repo::{CanvasRepo, RestoreOutcome, SaveOutcome};
pub use canvas_version_repo::CanvasVersionRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
