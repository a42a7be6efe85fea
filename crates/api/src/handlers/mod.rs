pub mod account;
pub mod admin;
pub mod auth;
pub mod canvas;
pub mod share;
