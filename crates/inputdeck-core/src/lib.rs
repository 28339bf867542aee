//! Reactive UI state between `inputdeck-api` and the views that render it.
//!
//! - **[`Store<T>`]**: one observable value. [`subscribe`](Store::subscribe)
//!   registers a callback that fires immediately and on every change;
//!   [`set`](Store::set) and [`update`](Store::update) replace the value.
//!   [`watch`](Store::watch) hands out a [`StoreStream`] for async consumers.
//!
//! - **[`AppState`]**: the context object owning the device list, the
//!   selected device and the [`ErrorLog`]. Pass it to consumers instead of
//!   reaching for globals; separate instances never share state.
//!
//! - **[`ErrorLog`]**: append-only record of HTTP-level failures. It is the
//!   [`ErrorSink`](inputdeck_api::ErrorSink) of the controller's client, so
//!   every rejected request lands here *and* is returned to the caller.
//!
//! - **[`Controller`]**: device workflows (refresh, add, remove, select)
//!   that call the backend and write results into the stores.

pub mod controller;
pub mod error;
pub mod error_log;
pub mod state;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use controller::Controller;
pub use error::CoreError;
pub use error_log::{ErrorEntries, ErrorLog};
pub use state::AppState;
pub use store::{Store, StoreStream, StoreWatchStream, Subscription};

// Re-export the wire types views work with.
pub use inputdeck_api::{
    ApiFailure, ClientConfig, Device, DeviceKind, MouseButton, ScrollDirection, TlsMode,
    TransportConfig,
};
