// Device API HTTP client
//
// Wraps `reqwest::Client` with the fixed `/api/v1.0` prefix, JSON body
// handling, and the failure-capture policy. Endpoint helpers (devices,
// mouse, ...) are inherent methods in separate files so this module stays
// focused on transport mechanics.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::error::{ApiFailure, Error};
use crate::models::ApiErrorPayload;
use crate::sink::ErrorSink;
use crate::transport::TransportConfig;

/// Logical path prefix every endpoint is appended to.
pub const API_PREFIX: &str = "/api/v1.0";

const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Serializes as `{}`; the default body for [`ApiClient::request`].
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EmptyBody {}

/// Where to reach the backend and how.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme + authority the API prefix is appended to.
    pub origin: Url,
    pub transport: TransportConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL"),
            transport: TransportConfig::default(),
        }
    }
}

/// HTTP client for the device API.
///
/// Successful responses resolve to their parsed JSON body. Non-success
/// responses are turned into an [`ApiFailure`], logged, pushed into the
/// injected [`ErrorSink`], and returned as [`Error::Http`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    origin: Url,
    sink: Arc<dyn ErrorSink>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("origin", &self.origin.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from a [`ClientConfig`], reporting failures to `sink`.
    pub fn new(config: &ClientConfig, sink: Arc<dyn ErrorSink>) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Ok(Self::with_client(http, config.origin.clone(), sink))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, origin: Url, sink: Arc<dyn ErrorSink>) -> Self {
        Self { http, origin, sink }
    }

    /// The backend origin.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{origin}/api/v1.0{endpoint}`.
    ///
    /// The endpoint is appended verbatim and is expected to start with `/`.
    pub fn api_url(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.origin.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{API_PREFIX}{endpoint}"))?)
    }

    /// Percent-encode `raw` for use as a single path segment, so ids
    /// containing `/`, `?` or `#` cannot change the route.
    pub(crate) fn path_segment(raw: &str) -> String {
        url::form_urlencoded::byte_serialize(raw.as_bytes())
            .collect::<String>()
            .replace('+', "%20")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Perform one round-trip and return the parsed JSON body.
    ///
    /// For any method other than `GET`, `body` is sent as JSON with
    /// `Content-Type: application/json`. `GET` requests never carry a body.
    pub async fn request<B>(
        &self,
        endpoint: &str,
        method: Method,
        body: &B,
    ) -> Result<serde_json::Value, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.api_url(endpoint)?;
        debug!(%method, %url, "sending request");

        let mut builder = self.http.request(method.clone(), url);
        if method != Method::GET {
            builder = builder.json(body);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        self.parse_response(resp, method, endpoint).await
    }

    /// `GET` an endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<serde_json::Value, Error> {
        self.request(endpoint, Method::GET, &EmptyBody {}).await
    }

    /// Like [`request`](Self::request), decoding the body into `T`.
    ///
    /// A body that is valid JSON but the wrong shape is a
    /// [`Error::Deserialization`] and is not recorded in the sink.
    pub async fn request_as<T, B>(&self, endpoint: &str, method: Method, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let value = self.request(endpoint, method, body).await?;
        T::deserialize(&value).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })
    }

    /// Resolve a success body, or capture and return the failure.
    async fn parse_response(
        &self,
        resp: reqwest::Response,
        method: Method,
        endpoint: &str,
    ) -> Result<serde_json::Value, Error> {
        let status = resp.status();

        if status.is_success() {
            let body = resp.text().await.map_err(Error::Transport)?;
            return serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: body.clone(),
                }
            });
        }

        // An unreadable body is treated like a non-JSON one.
        let body = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorPayload>(&body) {
            Ok(payload) => payload.error,
            Err(_) => status_text(status),
        };

        let failure = Arc::new(ApiFailure::new(message, status, method, endpoint));
        error!(
            status = failure.status.as_u16(),
            method = %failure.method,
            endpoint = %failure.endpoint,
            "{}",
            failure.message
        );
        self.sink.record(Arc::clone(&failure));

        Err(Error::Http(failure))
    }
}

/// Reason phrase for a status, e.g. `"Not Found"`.
///
/// reqwest does not expose the server's own reason phrase, so the
/// canonical one is used; unregistered codes fall back to the number.
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_owned(), str::to_owned)
}
