//! trivia-server: HTTP API for trivia questions and quizzes
//!
//! Serves categories, paginated question listings, search, question
//! creation/deletion and random quiz draws over JSON. Storage is reached
//! through [`store::TriviaStore`], backed by Postgres in production and by
//! [`store::MemoryStore`] in tests.

pub mod db;
pub mod http;
pub mod models;
pub mod store;

pub use db::PgStore;
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use store::{MemoryStore, StoreError, TriviaStore};
