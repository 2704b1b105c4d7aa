//! HTTP request handlers.

mod handlers;

pub use handlers::{MAX_FILE_SIZE, health_check, parse_invoice};
