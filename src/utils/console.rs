//! Browser console logging.
//!
//! Thin wrappers over `web_sys::console`. Off the browser (native unit tests)
//! the calls are no-ops, since the console bindings only exist on wasm32.

/// Log an error message to the browser console.
pub fn error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Log a warning message to the browser console.
pub fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
