//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Keyboard input
//! - On-screen notifications

pub mod input;
pub mod notify;
pub mod storage;

pub use input::{KeyCommand, Keyboard};
pub use notify::{ActiveNotification, Notification, NotificationQueue, NotificationSink};
pub use storage::{MemoryStorage, Storage, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
