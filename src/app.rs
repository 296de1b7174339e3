//! Root application module.
//!
//! Contains the main App component following Leptos conventions.

use leptos::prelude::*;

use crate::components::{HomeInfoProvider, HomeView};

/// Root application component.
///
/// Provides home info state to the page through [`HomeInfoProvider`] and
/// renders the [`HomeView`] page. Fetch and cache failures never escape the
/// provider; they surface through its `error` signal instead.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <HomeInfoProvider>
            <HomeView />
        </HomeInfoProvider>
    }
}
