//! UI components built with Leptos.
//!
//! - [`home_info`] - Home info provider and its consumer hook
//! - [`home`] - Home page view

pub mod home;
pub mod home_info;

pub use home::HomeView;
pub use home_info::{HomeInfoContext, HomeInfoProvider, use_home_info};
