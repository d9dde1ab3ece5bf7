//! Data models for the application
//!
//! Database rows and the request/response schemas of the portfolio endpoint.

mod photo;

pub use photo::*;
