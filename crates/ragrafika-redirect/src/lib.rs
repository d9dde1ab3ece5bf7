//! Ragrafika redirect server
//!
//! Answers every request on the www host with a small HTML page that moves the
//! browser to the same path on the canonical host.

pub mod config;
pub mod handlers;
pub mod page;
pub mod setup;

pub use config::RedirectConfig;
pub use page::{build_target_url, render_html};
