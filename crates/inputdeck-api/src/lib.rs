// inputdeck-api: Async Rust client for the virtual input device REST API

pub mod client;
mod devices;
pub mod error;
pub mod models;
mod mouse;
pub mod sink;
pub mod transport;

pub use client::{API_PREFIX, ApiClient, ClientConfig, EmptyBody};
pub use error::{ApiFailure, Error};
pub use models::{Ack, ApiErrorPayload, Device, DeviceKind, DeviceList, MouseButton, ScrollDirection};
pub use reqwest::{Method, StatusCode};
pub use sink::{ErrorSink, NoopSink};
pub use transport::{TlsMode, TransportConfig};
