// ── Development proxy rule ──
//
// During local development the UI's `/api` calls are forwarded to a real
// backend. The rule is plain configuration; the request client never
// reads it and always targets the logical `/api/v1.0` prefix.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::ConfigError;

/// Forward requests whose path starts with `prefix` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyRule {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Backend origin. Usually supplied through `INPUTDECK_SERVER_URL`.
    #[serde(default)]
    pub target: Option<Url>,

    /// Verify the target's TLS certificate.
    #[serde(default)]
    pub secure: bool,

    /// Rewrite the `Host` header to the target's authority.
    #[serde(default = "default_change_origin")]
    pub change_origin: bool,
}

impl Default for ProxyRule {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            target: None,
            secure: false,
            change_origin: default_change_origin(),
        }
    }
}

fn default_prefix() -> String {
    "/api".into()
}
fn default_change_origin() -> bool {
    true
}

impl ProxyRule {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.prefix.starts_with('/') {
            return Err(ConfigError::Validation {
                field: "dev_proxy.prefix".into(),
                reason: format!("must start with '/', got {:?}", self.prefix),
            });
        }
        if let Some(target) = &self.target {
            if !matches!(target.scheme(), "http" | "https") {
                return Err(ConfigError::Validation {
                    field: "dev_proxy.target".into(),
                    reason: format!("unsupported scheme {:?}", target.scheme()),
                });
            }
        }
        Ok(())
    }

    /// Whether a request path falls under this rule.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Where a matching request should be sent: the target origin with
    /// the path and query left untouched.
    ///
    /// `None` when the path does not match or no target is configured.
    pub fn forward_url(&self, path_and_query: &str) -> Result<Option<Url>, ConfigError> {
        let Some(target) = self.target.as_ref().filter(|_| self.matches(path_and_query)) else {
            return Ok(None);
        };
        let base = target.as_str().trim_end_matches('/');
        Ok(Some(Url::parse(&format!("{base}{path_and_query}"))?))
    }

    /// `Host` header for forwarded requests, when the origin is rewritten.
    pub fn host_header(&self) -> Option<String> {
        if !self.change_origin {
            return None;
        }
        let target = self.target.as_ref()?;
        let host = target.host_str()?;
        Some(match target.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rule(target: &str) -> ProxyRule {
        ProxyRule {
            target: Some(Url::parse(target).unwrap()),
            ..ProxyRule::default()
        }
    }

    #[test]
    fn default_rule_matches_api_prefix() {
        let r = ProxyRule::default();
        assert!(r.matches("/api/v1.0/devices"));
        assert!(!r.matches("/assets/index.js"));
        assert!(!r.secure);
        assert!(r.change_origin);
    }

    #[test]
    fn forward_url_keeps_path_and_query() {
        let r = rule("https://10.0.0.5:8443/");
        let url = r.forward_url("/api/v1.0/devices?verbose=1").unwrap().unwrap();
        assert_eq!(url.as_str(), "https://10.0.0.5:8443/api/v1.0/devices?verbose=1");
    }

    #[test]
    fn forward_url_is_none_without_match_or_target() {
        assert_eq!(rule("http://backend").forward_url("/index.html").unwrap(), None);
        assert_eq!(ProxyRule::default().forward_url("/api/v1.0/devices").unwrap(), None);
    }

    #[test]
    fn host_header_follows_change_origin() {
        let mut r = rule("http://backend.lan:8080");
        assert_eq!(r.host_header().as_deref(), Some("backend.lan:8080"));
        r.change_origin = false;
        assert_eq!(r.host_header(), None);
    }

    #[test]
    fn validate_rejects_relative_prefix_and_odd_scheme() {
        let mut r = ProxyRule {
            prefix: "api".into(),
            ..ProxyRule::default()
        };
        assert!(matches!(r.validate(), Err(ConfigError::Validation { .. })));

        r.prefix = "/api".into();
        r.target = Some(Url::parse("ftp://backend").unwrap());
        assert!(matches!(r.validate(), Err(ConfigError::Validation { .. })));

        r.target = Some(Url::parse("http://backend").unwrap());
        assert!(r.validate().is_ok());
    }
}
