//! Database repositories
//!
//! One repository per table. Handlers depend on the `PhotoStore` trait so tests
//! can substitute an in-memory implementation.

pub mod photo;

pub use photo::{PhotoRepository, PhotoStore};
