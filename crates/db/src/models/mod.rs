//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Serialize` response shapes where the row must not be exposed directly
//! - Create DTOs for inserts

pub mod account;
pub mod canvas;
pub mod canvas_version;
pub mod session;
pub mod user;
