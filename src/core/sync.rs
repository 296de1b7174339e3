//! Mount lifecycle for the home info provider.
//!
//! [`mount`] wires together the three collaborators of a provider instance:
//! the fetch source, the persisted store and the reactive state cell. It
//! starts the single fetch of the mount, subscribes to cross-tab changes and
//! hands back a [`Mounted`] guard whose teardown cancels both.
//!
//! Nothing here depends on a UI framework, so the whole lifecycle runs in
//! native tests against [`MemoryStore`](crate::core::storage::MemoryStore).

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::core::error::FetchError;
use crate::core::home_info::HomeInfoState;
use crate::core::storage::{KeyValueStore, StorageChange, Subscription};
use crate::models::HomeInfo;
use crate::utils::console;

/// Asynchronous producer of the home info payload.
///
/// `Ok(None)` means the request succeeded without a payload.
pub trait HomeInfoSource {
    /// Start a fetch. The returned future owns everything it needs.
    fn fetch(&self) -> impl Future<Output = Result<Option<HomeInfo>, FetchError>> + 'static;
}

/// Shared, mutable home info state.
///
/// `commit` applies a transition; the closure returns whether state changed
/// so reactive cells can skip notifying subscribers.
pub trait StateCell: Clone + 'static {
    fn commit(&self, f: impl FnOnce(&mut HomeInfoState) -> bool);
}

impl StateCell for Rc<RefCell<HomeInfoState>> {
    fn commit(&self, f: impl FnOnce(&mut HomeInfoState) -> bool) {
        f(&mut self.borrow_mut());
    }
}

/// Cooperative cancellation flag shared between a mount and its fetch task.
///
/// Cancelling does not abort the request; the result is discarded instead.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Guard for a live mount. Dropping it tears the mount down.
#[must_use = "dropping the guard immediately tears down the mount"]
pub struct Mounted {
    cancel: CancelToken,
    _subscription: Subscription,
}

impl Mounted {
    /// Cancel the pending fetch commit and stop listening for changes.
    pub fn teardown(self) {
        drop(self);
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Mount a provider instance.
///
/// Synchronously marks the state as loading when nothing is cached, invokes
/// `source` exactly once and subscribes to external changes of `key`. The
/// returned future settles the fetch and must be driven by the caller's
/// executor; it commits nothing once the guard has been torn down.
pub fn mount<K, S, C>(
    store: &K,
    key: &str,
    source: &S,
    cell: C,
) -> (Mounted, impl Future<Output = ()> + 'static)
where
    K: KeyValueStore,
    S: HomeInfoSource + 'static,
    C: StateCell,
{
    let cancel = CancelToken::new();

    cell.commit(|state| {
        let was_loading = state.loading;
        state.begin_fetch();
        state.loading != was_loading
    });
    let pending = source.fetch();

    let tracked = key.to_string();
    let listener_cell = cell.clone();
    let subscription = store.subscribe(Rc::new(move |change: &StorageChange| {
        if change.is_for(&tracked) {
            listener_cell.commit(|state| state.apply_storage_change(&tracked, change));
        }
    }));

    let token = cancel.clone();
    let task = async move {
        let result = pending.await;
        if token.is_cancelled() {
            return;
        }
        if let Err(e) = &result {
            console::error(&format!("Error fetching home info: {e}"));
        }
        cell.commit(|state| {
            state.apply_fetch(result);
            true
        });
    };

    let mounted = Mounted {
        cancel,
        _subscription: subscription,
    };
    (mounted, task)
}
