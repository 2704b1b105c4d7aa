//! HTTP API for invoice document parsing.

pub mod api;
pub mod config;
pub mod server;

pub use config::AppConfig;
pub use server::{AppState, build_router};
