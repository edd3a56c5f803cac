pub mod app;
pub mod chat;
pub mod compose;
pub mod config;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod models;
pub mod routes;
pub mod weather;

// Re-export key functions for convenience
pub use app::{create_app, init_tracing};
pub use chat::answer;
pub use intent::{Intent, interpret};
