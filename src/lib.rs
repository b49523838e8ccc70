//! Trivia question bank and quiz-session backend.
//!
//! - Paginated listing, substring search and per-category listing of questions
//! - Stateless "next unseen question" quiz selection
//! - In-memory catalog store behind the `CatalogStore` capability

pub mod config;
pub mod domain;
pub mod error;
pub mod logic;
pub mod pager;
pub mod protocol;
pub mod quiz;
pub mod routes;
pub mod search;
pub mod seeds;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;

pub use routes::build_router;
pub use state::AppState;
