//! HTTP client for the external token introspection endpoint.

use lessons_config::OAuthConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::identity::IdentityContext;

#[derive(Debug, Error)]
pub enum IntrospectionError {
    /// The HTTP client could not be constructed.
    #[error("introspection client could not be built")]
    ClientBuild(#[source] reqwest::Error),

    /// The authority answered with a non-2xx status.
    #[error("token rejected by introspection endpoint (status {status})")]
    Rejected { status: u16 },

    /// Network failure or timeout before a status was received.
    #[error("introspection endpoint unreachable")]
    Unreachable(#[source] reqwest::Error),
}

impl IntrospectionError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            IntrospectionError::ClientBuild(_) => "client_build",
            IntrospectionError::Rejected { .. } => "rejected",
            IntrospectionError::Unreachable(_) => "unreachable",
        }
    }
}

/// Sends bearer credentials to the configured validation endpoint.
///
/// The client is built once at startup and shared; the endpoint is resolved
/// from [`OAuthConfig`] at construction time. Every call is bounded by the
/// configured timeout and nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct IntrospectionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl IntrospectionClient {
    pub fn new(config: &OAuthConfig) -> Result<Self, IntrospectionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(IntrospectionError::ClientBuild)?;

        Ok(Self {
            http,
            endpoint: config.validate_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Forwards `authorization` (the full header value) to the authority.
    ///
    /// On a 2xx status the request is authorized. A JSON body, when present
    /// and parseable, becomes the identity context; otherwise the context is
    /// empty.
    #[instrument(skip(self, authorization), fields(endpoint = %self.endpoint))]
    pub async fn introspect(&self, authorization: &str) -> Result<IdentityContext, IntrospectionError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(IntrospectionError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status.as_u16(), "Token rejected");
            return Err(IntrospectionError::Rejected {
                status: status.as_u16(),
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains("application/json"));

        if !is_json {
            debug!("Token accepted without identity payload");
            return Ok(IdentityContext::empty());
        }

        match response.json::<Value>().await {
            Ok(payload) => {
                debug!("Token accepted");
                Ok(IdentityContext::from_payload(payload))
            }
            Err(err) => {
                debug!(error = %err, "Ignoring unreadable identity payload");
                Ok(IdentityContext::empty())
            }
        }
    }
}
