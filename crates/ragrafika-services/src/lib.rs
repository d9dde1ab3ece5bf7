//! Ragrafika Services Library
//!
//! Clients for third-party services used by the portfolio API.

pub mod services;

pub use services::yandex_art::{
    random_seed, GenerationRequest, Operation, YandexArtClient, YandexArtError,
};
