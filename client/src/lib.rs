//! # Todo Client
//!
//! Client-side logic for the per-device todo service.
//!
//! ## Pieces
//! - [`device`] — random per-installation identifier, cached in a durable
//!   local store; the whole identity story, no accounts
//! - [`api`] — typed HTTP client for the four endpoints
//! - [`state`] — ordered local collection with optimistic creates and
//!   confirmed updates/deletes
//! - [`notifier`] — 60-second due-soon scan raising one-shot toasts
//!
//! ## Flow
//! Device id → initial list fetch → render → user action → API call →
//! response folded back into local state. The notifier ticks independently
//! over snapshots of the same collection.

pub mod api;
pub mod device;
pub mod notifier;
pub mod state;

pub use api::{ApiError, TodoApi};
pub use device::{DeviceStore, FileDeviceStore, get_or_create_device_id};
pub use notifier::{AlertSink, DueSoonNotifier, LogToasts, NotifierHandle};
pub use state::{StatusFilter, TodoAppState};
