//! HTTP surface for the Reach retrieval and generation engine.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use server::{build_router, AppState};
