//! Token introspection configuration.
//!
//! Bearer tokens are validated by an external OAuth service. The endpoint the
//! gate posts to is resolved with the following precedence:
//!
//! 1. `OAUTH_VALIDATE_ENDPOINT`: an explicit, complete URL
//! 2. `OAUTH_SERVICE_URL` + `OAUTH_VALIDATE_PATH`
//! 3. `OAUTH_INTERNAL_PROTOCOL://OAUTH_INTERNAL_HOST[:OAUTH_INTERNAL_API_PORT]` + `OAUTH_VALIDATE_PATH`
//!
//! A trailing slash on the base and a missing leading slash on the path are
//! normalized before the two are joined.
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `OAUTH_VALIDATE_ENDPOINT` | unset |
//! | `OAUTH_SERVICE_URL` | unset |
//! | `OAUTH_VALIDATE_PATH` | `/validate` |
//! | `OAUTH_INTERNAL_PROTOCOL` | `http` |
//! | `OAUTH_INTERNAL_HOST` | `oauth` |
//! | `OAUTH_INTERNAL_API_PORT` | unset |
//! | `OAUTH_TIMEOUT_SECS` | `5` |

use std::env;
use std::time::Duration;

pub const DEFAULT_VALIDATE_PATH: &str = "/validate";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Protocol/host/port triple used when no base URL is configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalOAuthHost {
    pub protocol: String,
    pub host: String,
    pub port: Option<u16>,
}

impl Default for InternalOAuthHost {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: "oauth".to_string(),
            port: None,
        }
    }
}

impl InternalOAuthHost {
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.protocol, self.host, port),
            None => format!("{}://{}", self.protocol, self.host),
        }
    }
}

#[derive(Clone, Debug)]
pub struct OAuthConfig {
    pub validate_endpoint: Option<String>,
    pub service_url: Option<String>,
    pub validate_path: String,
    pub internal: InternalOAuthHost,
    pub timeout: Duration,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            validate_endpoint: None,
            service_url: None,
            validate_path: DEFAULT_VALIDATE_PATH.to_string(),
            internal: InternalOAuthHost::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OAuthConfig {
    pub fn from_env() -> Self {
        let defaults = InternalOAuthHost::default();

        let port = env::var("OAUTH_INTERNAL_API_PORT")
            .ok()
            .filter(|v| !v.is_empty())
            .and_then(|v| match v.parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    tracing::warn!(value = %v, "Ignoring invalid OAUTH_INTERNAL_API_PORT");
                    None
                }
            });

        Self {
            validate_endpoint: non_empty_var("OAUTH_VALIDATE_ENDPOINT"),
            service_url: non_empty_var("OAUTH_SERVICE_URL"),
            validate_path: non_empty_var("OAUTH_VALIDATE_PATH")
                .unwrap_or_else(|| DEFAULT_VALIDATE_PATH.to_string()),
            internal: InternalOAuthHost {
                protocol: non_empty_var("OAUTH_INTERNAL_PROTOCOL").unwrap_or(defaults.protocol),
                host: non_empty_var("OAUTH_INTERNAL_HOST").unwrap_or(defaults.host),
                port,
            },
            timeout: Duration::from_secs(
                env::var("OAUTH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }

    /// Config pointing straight at a known endpoint. Used by tests and tooling.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            validate_endpoint: Some(endpoint.into()),
            ..Self::default()
        }
    }

    /// Resolves the URL the introspection request is sent to.
    pub fn validate_endpoint(&self) -> String {
        if let Some(endpoint) = &self.validate_endpoint {
            return endpoint.clone();
        }

        let base = self
            .service_url
            .clone()
            .unwrap_or_else(|| self.internal.base_url());

        join_url(&base, &self.validate_path)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);

    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
