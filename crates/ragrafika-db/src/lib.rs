//! Database access layer for portfolio photos.

pub mod db;

pub use db::{PhotoRepository, PhotoStore};
