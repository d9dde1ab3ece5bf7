//! Ragrafika Storage Library
//!
//! Storage abstraction for portfolio images with S3 (object_store) and local
//! filesystem backends.
//!
//! # Storage key format
//!
//! - originals: `portfolio/original/{category}/{file_id}.jpg`
//! - stylized results: `portfolio/styled/{category}/{file_id}.jpg`
//!
//! Keys must not contain `..` or a leading `/`. Key generation lives in the
//! `keys` module so every backend and caller agrees on the layout.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::PhotoKeys;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use ragrafika_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
