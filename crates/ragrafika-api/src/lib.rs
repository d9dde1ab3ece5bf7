//! Ragrafika API Library
//!
//! HTTP handlers, middleware and application setup for the portfolio photo endpoint.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
