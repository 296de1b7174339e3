//! Core home info logic, independent of the UI framework.
//!
//! This module provides:
//! - [`HomeInfoState`] and its transitions
//! - [`KeyValueStore`] storage abstraction with an in-memory [`MemoryStore`]
//! - [`mount`] lifecycle wiring fetch, cache and cross-tab sync

pub mod error;
mod home_info;
pub mod storage;
pub mod sync;

pub use home_info::HomeInfoState;
pub use storage::{KeyValueStore, MemoryStore, StorageChange, Subscription};
pub use sync::{CancelToken, HomeInfoSource, Mounted, StateCell, mount};
