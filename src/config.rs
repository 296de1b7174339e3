//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the page header.
pub const APP_NAME: &str = "home";

// =============================================================================
// Network Configuration
// =============================================================================

/// Default endpoint serving the home info payload.
pub const HOME_INFO_URL: &str = "/api/home-info";

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

// =============================================================================
// Cache Configuration
// =============================================================================

/// Persistent cache configuration.
pub mod cache {
    /// localStorage key holding the home info envelope.
    pub const HOME_INFO_KEY: &str = "homeInfoCache";
}
