//! Network fetching utilities with timeout support.
//!
//! Provides the browser fetch wrapper and the HTTP-backed home info source.

use std::future::Future;

use js_sys::{Array, Promise};
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::config::{FETCH_TIMEOUT_MS, HOME_INFO_URL, cache};
use crate::core::error::FetchError;
use crate::core::sync::HomeInfoSource;
use crate::models::{CachedEnvelope, HomeInfo};
use crate::utils::{LocalStorageStore, console};

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout using `Promise.race`.
///
/// The timeout promise resolves to `undefined`, so a promise that itself
/// resolves to `undefined` is indistinguishable from a timeout.
async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) if result.is_undefined() => RaceResult::TimedOut,
        Ok(result) => RaceResult::Completed(result),
        Err(e) => RaceResult::Error(
            e.as_string()
                .or_else(|| e.dyn_ref::<js_sys::Error>().map(|err| err.message().into()))
                .unwrap_or_else(|| "Unknown error".to_string()),
        ),
    }
}

// =============================================================================
// Fetch Functions
// =============================================================================

/// Fetch and parse JSON from a URL.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let text = fetch_url(url).await?;
    serde_json::from_str(&text).map_err(|e| FetchError::JsonParseError(e.to_string()))
}

/// Fetch text from a URL using the Fetch API with timeout.
///
/// If the request takes longer than `FETCH_TIMEOUT_MS`, returns
/// `FetchError::Timeout`. The request itself keeps running in that case.
async fn fetch_url(url: &str) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    let fetch_promise = window.fetch_with_request(&request);

    match race_with_timeout(fetch_promise, FETCH_TIMEOUT_MS).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
        RaceResult::Completed(result) => {
            let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;

            if !resp.ok() {
                return Err(FetchError::HttpError(resp.status()));
            }

            let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
                .await
                .map_err(|_| FetchError::ResponseReadFailed)?;

            text.as_string().ok_or(FetchError::InvalidContent)
        }
    }
}

// =============================================================================
// HttpHomeInfoSource
// =============================================================================

/// Fetches home info over HTTP and refreshes the localStorage cache.
///
/// A successful, non-empty response is written back as a [`CachedEnvelope`]
/// stamped with the current time. Cache write failures are only logged.
#[derive(Clone, Debug)]
pub struct HttpHomeInfoSource {
    url: String,
    cache_key: String,
    store: LocalStorageStore,
}

impl HttpHomeInfoSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cache_key: cache::HOME_INFO_KEY.to_string(),
            store: LocalStorageStore::new(),
        }
    }
}

impl Default for HttpHomeInfoSource {
    fn default() -> Self {
        Self::new(HOME_INFO_URL)
    }
}

impl HomeInfoSource for HttpHomeInfoSource {
    fn fetch(&self) -> impl Future<Output = Result<Option<HomeInfo>, FetchError>> + 'static {
        let this = self.clone();
        async move {
            let body: Value = fetch_json(&this.url).await?;
            let Some(info) = HomeInfo::from_fetched(body) else {
                return Ok(None);
            };

            let envelope = CachedEnvelope::new(info.clone(), js_sys::Date::now() as u64);
            if let Err(e) = this.store.set_json(&this.cache_key, &envelope) {
                console::warn(&format!("Failed to cache home info: {e}"));
            }

            Ok(Some(info))
        }
    }
}
