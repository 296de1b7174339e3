//! Utility modules for browser APIs.
//!
//! Provides:
//! - [`LocalStorageStore`] - localStorage-backed key/value store
//! - [`HttpHomeInfoSource`], [`fetch_json`] - Network fetching with timeout
//! - [`console`] - Browser console logging

mod cache;
pub mod console;
pub mod dom;
mod fetch;

pub use cache::LocalStorageStore;
pub use fetch::{HttpHomeInfoSource, fetch_json};
