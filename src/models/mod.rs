//! Data models and types for the application.
//!
//! - [`HomeInfo`] - Opaque home info payload
//! - [`CachedEnvelope`] - The JSON envelope persisted in `localStorage`

mod home_info;

pub use home_info::{CachedEnvelope, HomeInfo};
