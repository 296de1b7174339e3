//! Home info provider for Leptos applications.
//!
//! Fetches the home info payload once per mount, caches it in localStorage
//! and keeps every open tab in sync with the cache.

mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use app::App;
