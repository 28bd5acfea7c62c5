//! # Conference API
//!
//! Read-only HTTP surface over the conference service.

pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
