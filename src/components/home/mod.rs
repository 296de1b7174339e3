//! Home page view.
//!
//! Renders the home info published by the enclosing provider: a loading
//! notice, the last error and the payload itself.

use leptos::prelude::*;

use crate::components::home_info::use_home_info;
use crate::config::APP_NAME;
use crate::models::HomeInfo;

/// Heading and body text for a payload.
///
/// Uses the `title` field when present; the body is always the pretty-printed
/// JSON of the payload.
fn describe(info: &HomeInfo) -> (String, String) {
    let title = info.title().unwrap_or(APP_NAME).to_string();
    let body = serde_json::to_string_pretty(info.as_value()).unwrap_or_default();
    (title, body)
}

#[component]
fn HomeInfoCard(info: HomeInfo) -> impl IntoView {
    let (title, body) = describe(&info);

    view! {
        <section style="padding: 1rem; background: #151a35; border-radius: 4px;">
            <h2 style="margin: 0 0 1rem 0; color: #4a90e2;">{title}</h2>
            <pre style="margin: 0; white-space: pre-wrap; color: #a0a0a0;">{body}</pre>
        </section>
    }
}

/// Home page consumer of [`HomeInfoContext`](crate::components::HomeInfoContext).
#[component]
pub fn HomeView() -> impl IntoView {
    let Some(ctx) = use_home_info() else {
        return view! { <p>"Home info is not available here."</p> }.into_any();
    };

    view! {
        <main style="max-width: 720px; margin: 0 auto; padding: 2rem;">
            <h1>{APP_NAME}</h1>
            {move || ctx.loading.get().then(|| view! {
                <p style="color: #6c7a89;">"Loading..."</p>
            })}
            {move || ctx.error.get().map(|e| view! {
                <p style="color: #ff6b6b;">{e.to_string()}</p>
            })}
            {move || ctx.home_info.get().map(|info| view! { <HomeInfoCard info=info /> })}
        </main>
    }
    .into_any()
}
