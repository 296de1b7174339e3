//! Home info provider and consumer hook.
//!
//! [`HomeInfoProvider`] owns the home info state of its subtree: it seeds the
//! state from the localStorage cache, fetches fresh data once per mount and
//! mirrors cache changes made by other tabs. Descendants read the state
//! through [`use_home_info`].

use std::future::Future;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config::cache;
use crate::core::error::HomeInfoError;
use crate::core::{HomeInfoSource, HomeInfoState, KeyValueStore, Mounted, StateCell, mount};
use crate::models::HomeInfo;
use crate::utils::{HttpHomeInfoSource, LocalStorageStore};

impl StateCell for RwSignal<HomeInfoState> {
    fn commit(&self, f: impl FnOnce(&mut HomeInfoState) -> bool) {
        // A disposed signal means the provider is gone; drop the write.
        self.try_maybe_update(|state| (f(state), ()));
    }
}

/// Read-only home info state published to descendants.
///
/// `Copy` because all fields are Leptos signals.
#[derive(Clone, Copy)]
pub struct HomeInfoContext {
    /// Latest payload, from the cache, the fetch or another tab.
    pub home_info: Signal<Option<HomeInfo>>,
    /// Whether the mount's fetch is outstanding with nothing to show.
    pub loading: Signal<bool>,
    /// Last fetch failure, or [`HomeInfoError::NotFound`] for an empty result.
    pub error: Signal<Option<HomeInfoError>>,
}

impl HomeInfoContext {
    fn from_state(state: RwSignal<HomeInfoState>) -> Self {
        Self {
            home_info: Signal::derive(move || state.with(|s| s.home_info.clone())),
            loading: Signal::derive(move || state.with(|s| s.loading)),
            error: Signal::derive(move || state.with(|s| s.error.clone())),
        }
    }
}

/// Mount home info state under the current owner and provide it as context.
///
/// The mount is torn down when the owner is cleaned up. The returned future
/// settles the fetch and is left to the caller to spawn.
fn provide_home_info<K, S>(
    store: &K,
    source: &S,
) -> (HomeInfoContext, impl Future<Output = ()> + 'static)
where
    K: KeyValueStore,
    S: HomeInfoSource + 'static,
{
    let state = RwSignal::new(HomeInfoState::initialize(store, cache::HOME_INFO_KEY));
    let (mounted, task) = mount(store, cache::HOME_INFO_KEY, source, state);

    // The guard is !Send; keep it in local arena storage until cleanup.
    let mounted = StoredValue::new_local(Some(mounted));
    on_cleanup(move || {
        mounted.try_update_value(|m| m.take().map(Mounted::teardown));
    });

    let ctx = HomeInfoContext::from_state(state);
    provide_context(ctx);
    (ctx, task)
}

/// Provides [`HomeInfoContext`] to its children.
///
/// `url` overrides the default home info endpoint.
#[component]
pub fn HomeInfoProvider(
    #[prop(optional, into)] url: Option<String>,
    children: Children,
) -> impl IntoView {
    let source = url.map(HttpHomeInfoSource::new).unwrap_or_default();
    let (_, task) = provide_home_info(&LocalStorageStore::new(), &source);
    spawn_local(task);

    children()
}

/// Home info state of the nearest enclosing [`HomeInfoProvider`].
///
/// Returns `None` outside a provider.
pub fn use_home_info() -> Option<HomeInfoContext> {
    use_context::<HomeInfoContext>()
}
