//! Ragrafika Core Library
//!
//! Domain models, error types and configuration shared by the portfolio API,
//! its storage and database layers.

pub mod config;
pub mod error;
pub mod models;
#[cfg(feature = "runtime")]
pub mod shutdown;
pub mod storage_types;
#[cfg(feature = "runtime")]
pub mod telemetry;

// Re-export commonly used types
pub use config::{Config, PortfolioConfig, StylizeSettings};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
