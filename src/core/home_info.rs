//! Home info provider state and its transitions.

use crate::core::error::{FetchError, HomeInfoError};
use crate::core::storage::{KeyValueStore, StorageChange};
use crate::models::{CachedEnvelope, HomeInfo};

/// State owned by one provider instance.
///
/// `error` and `home_info` may both be set: a cached value stays visible
/// after a later fetch fails.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HomeInfoState {
    pub home_info: Option<HomeInfo>,
    pub loading: bool,
    pub error: Option<HomeInfoError>,
}

/// Read a non-empty cache entry. An empty string counts as absent.
fn cached_entry(store: &impl KeyValueStore, key: &str) -> Option<String> {
    store.get(key).filter(|raw| !raw.is_empty())
}

impl HomeInfoState {
    /// Seed state synchronously from the persisted cache.
    ///
    /// `loading` depends only on whether an entry exists, not on whether it
    /// parses: an unparseable entry yields no data and `loading == false`.
    pub fn initialize(store: &impl KeyValueStore, key: &str) -> Self {
        let cached = cached_entry(store, key);
        let loading = cached.is_none();
        let home_info = cached
            .and_then(|raw| CachedEnvelope::parse(&raw).ok())
            .and_then(|envelope| envelope.data);

        Self {
            home_info,
            loading,
            error: None,
        }
    }

    fn has_data(&self) -> bool {
        self.home_info.as_ref().is_some_and(HomeInfo::is_truthy)
    }

    /// Mark a fetch as outstanding when there is nothing to show yet.
    pub fn begin_fetch(&mut self) {
        if !self.has_data() {
            self.loading = true;
        }
    }

    /// Record the settled fetch. Always clears `loading`.
    pub fn apply_fetch(&mut self, result: Result<Option<HomeInfo>, FetchError>) {
        match result {
            Ok(Some(info)) if info.is_truthy() => self.home_info = Some(info),
            Ok(_) => self.error = Some(HomeInfoError::NotFound),
            Err(e) => self.error = Some(HomeInfoError::Fetch(e)),
        }
        self.loading = false;
    }

    /// Mirror an external change of the tracked key.
    ///
    /// Returns `true` when state was written. Unparseable values are ignored.
    pub fn apply_storage_change(&mut self, key: &str, change: &StorageChange) -> bool {
        if !change.is_for(key) {
            return false;
        }

        match change.new_value.as_deref().filter(|raw| !raw.is_empty()) {
            Some(raw) => match CachedEnvelope::parse(raw) {
                Ok(envelope) => self.home_info = envelope.data,
                Err(_) => return false,
            },
            None => self.home_info = None,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use serde_json::json;

    const KEY: &str = "homeInfoCache";

    fn info(value: serde_json::Value) -> HomeInfo {
        HomeInfo::new(value).unwrap()
    }

    #[test]
    fn test_initialize_empty_store() {
        let state = HomeInfoState::initialize(&MemoryStore::new(), KEY);
        assert_eq!(state.home_info, None);
        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_initialize_from_cached_envelope() {
        let store = MemoryStore::with_entry(KEY, r#"{"data":{"title":"My Home"},"timestamp":1000}"#);
        let state = HomeInfoState::initialize(&store, KEY);
        assert_eq!(state.home_info.as_ref().and_then(HomeInfo::title), Some("My Home"));
        assert!(!state.loading);
    }

    #[test]
    fn test_initialize_envelope_without_data() {
        let store = MemoryStore::with_entry(KEY, r#"{"timestamp":1000}"#);
        let state = HomeInfoState::initialize(&store, KEY);
        assert_eq!(state.home_info, None);
        assert!(!state.loading);
    }

    #[test]
    fn test_initialize_unparseable_entry_is_not_loading() {
        let store = MemoryStore::with_entry(KEY, "{broken");
        let state = HomeInfoState::initialize(&store, KEY);
        assert_eq!(state.home_info, None);
        assert!(!state.loading);
    }

    #[test]
    fn test_initialize_empty_string_counts_as_absent() {
        let store = MemoryStore::with_entry(KEY, "");
        let state = HomeInfoState::initialize(&store, KEY);
        assert_eq!(state.home_info, None);
        assert!(state.loading);
    }

    #[test]
    fn test_initialize_ignores_other_keys() {
        let store = MemoryStore::with_entry("other", r#"{"data":1}"#);
        assert!(HomeInfoState::initialize(&store, KEY).loading);
    }

    #[test]
    fn test_begin_fetch_only_loads_without_data() {
        let mut state = HomeInfoState::default();
        state.begin_fetch();
        assert!(state.loading);

        let mut state = HomeInfoState {
            home_info: Some(info(json!({"title": "x"}))),
            ..Default::default()
        };
        state.begin_fetch();
        assert!(!state.loading);

        // A falsy cached payload is treated as nothing to show.
        let mut state = HomeInfoState {
            home_info: Some(info(json!(0))),
            ..Default::default()
        };
        state.begin_fetch();
        assert!(state.loading);
    }

    #[test]
    fn test_apply_fetch_success() {
        let mut state = HomeInfoState {
            loading: true,
            ..Default::default()
        };
        state.apply_fetch(Ok(Some(info(json!({"title": "Fresh"})))));
        assert_eq!(state.home_info.as_ref().and_then(HomeInfo::title), Some("Fresh"));
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_apply_fetch_empty_keeps_stale_data() {
        let stale = info(json!({"title": "Stale"}));
        let mut state = HomeInfoState {
            home_info: Some(stale.clone()),
            ..Default::default()
        };
        state.apply_fetch(Ok(None));
        assert_eq!(state.home_info, Some(stale));
        assert_eq!(state.error, Some(HomeInfoError::NotFound));
        assert!(!state.loading);
    }

    #[test]
    fn test_apply_fetch_falsy_payload_is_not_found() {
        let mut state = HomeInfoState::default();
        state.apply_fetch(Ok(Some(info(json!("")))));
        assert_eq!(state.home_info, None);
        assert_eq!(state.error, Some(HomeInfoError::NotFound));
    }

    #[test]
    fn test_apply_fetch_failure_keeps_data() {
        let stale = info(json!({"title": "Stale"}));
        let mut state = HomeInfoState {
            home_info: Some(stale.clone()),
            loading: true,
            error: None,
        };
        state.apply_fetch(Err(FetchError::Timeout));
        assert_eq!(state.home_info, Some(stale));
        assert_eq!(state.error, Some(HomeInfoError::Fetch(FetchError::Timeout)));
        assert!(!state.loading);
    }

    #[test]
    fn test_storage_change_with_envelope() {
        let mut state = HomeInfoState::default();
        let change = StorageChange::new(KEY, Some(r#"{"data":{"title":"Other tab"}}"#.to_string()));
        assert!(state.apply_storage_change(KEY, &change));
        assert_eq!(state.home_info.as_ref().and_then(HomeInfo::title), Some("Other tab"));
    }

    #[test]
    fn test_storage_change_removal_clears_data() {
        let mut state = HomeInfoState {
            home_info: Some(info(json!({"title": "x"}))),
            ..Default::default()
        };
        assert!(state.apply_storage_change(KEY, &StorageChange::new(KEY, None)));
        assert_eq!(state.home_info, None);
    }

    #[test]
    fn test_storage_change_envelope_without_data_clears() {
        let mut state = HomeInfoState {
            home_info: Some(info(json!({"title": "x"}))),
            ..Default::default()
        };
        let change = StorageChange::new(KEY, Some("{}".to_string()));
        assert!(state.apply_storage_change(KEY, &change));
        assert_eq!(state.home_info, None);
    }

    #[test]
    fn test_storage_change_unparseable_is_ignored() {
        let before = HomeInfoState {
            home_info: Some(info(json!({"title": "x"}))),
            loading: false,
            error: Some(HomeInfoError::NotFound),
        };
        let mut state = before.clone();
        let change = StorageChange::new(KEY, Some("not json".to_string()));
        assert!(!state.apply_storage_change(KEY, &change));
        assert_eq!(state, before);
    }

    #[test]
    fn test_storage_change_other_key_is_ignored() {
        let before = HomeInfoState {
            home_info: Some(info(json!({"title": "x"}))),
            ..Default::default()
        };
        let mut state = before.clone();
        let change = StorageChange::new("theme", Some(r#"{"data":1}"#.to_string()));
        assert!(!state.apply_storage_change(KEY, &change));
        assert!(!state.apply_storage_change(KEY, &StorageChange::default()));
        assert_eq!(state, before);
    }
}
