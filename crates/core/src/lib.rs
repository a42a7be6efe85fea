//! Domain logic for the Business Model Canvas service.
//!
//! Everything here is free of database and HTTP dependencies so it can be
//! shared by the repository layer, the API server and tests.

pub mod account;
pub mod backup;
pub mod canvas;
pub mod error;
pub mod export;
pub mod owner;
pub mod types;
