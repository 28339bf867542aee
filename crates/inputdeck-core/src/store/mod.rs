// ── Reactive state containers ──
//
// Single-value observable stores with synchronous callbacks and async
// watch-based subscriptions.

mod cell;
mod stream;

pub use cell::{Store, Subscription};
pub use stream::{StoreStream, StoreWatchStream};
