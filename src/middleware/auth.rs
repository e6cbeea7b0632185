use axum::{
    extract::{FromRequestParts, Request, State},
    http::{Method, header, request::Parts},
    middleware::Next,
    response::Response,
};
use lessons_auth::{IdentityContext, IntrospectionClient, IntrospectionError};
use lessons_core::AppError;
use tracing::{debug, warn};

use crate::metrics;
use crate::state::AppState;

pub const MISSING_BEARER_TOKEN: &str = "Missing bearer token";
pub const TOKEN_VALIDATION_FAILED: &str = "Token validation failed";
pub const UNABLE_TO_VALIDATE_TOKEN: &str = "Unable to validate token";

/// Why a request was turned away at the gate.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `Authorization` header, or not of the form `Bearer <token>`.
    MissingCredential,
    /// The introspection endpoint refused the token or could not be asked.
    InvalidCredential(IntrospectionError),
}

impl AuthRejection {
    pub fn message(&self) -> &'static str {
        match self {
            AuthRejection::MissingCredential => MISSING_BEARER_TOKEN,
            AuthRejection::InvalidCredential(IntrospectionError::Rejected { .. }) => {
                TOKEN_VALIDATION_FAILED
            }
            AuthRejection::InvalidCredential(_) => UNABLE_TO_VALIDATE_TOKEN,
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            AuthRejection::MissingCredential => "missing",
            AuthRejection::InvalidCredential(err) => err.kind(),
        }
    }
}

/// True when `header` is exactly `Bearer <token>`: the scheme is
/// case-sensitive and the token must start right after the single space.
pub fn has_bearer_token(header: &str) -> bool {
    header
        .strip_prefix("Bearer ")
        .and_then(|rest| rest.split(' ').next())
        .is_some_and(|token| !token.is_empty())
}

/// Checks the raw `Authorization` value and, if well formed, asks the
/// introspection endpoint about it. The header is forwarded unchanged.
pub async fn authenticate(
    client: &IntrospectionClient,
    authorization: Option<&str>,
) -> Result<IdentityContext, AuthRejection> {
    let authorization = authorization
        .filter(|value| has_bearer_token(value))
        .ok_or(AuthRejection::MissingCredential)?;

    client
        .introspect(authorization)
        .await
        .map_err(AuthRejection::InvalidCredential)
}

/// Routes reachable without credentials. Only `GET` is exempt.
fn is_public_route(method: &Method, path: &str) -> bool {
    if method != Method::GET {
        return false;
    }

    matches!(path, "/" | "/api/v1/health" | "/api/v1/docs")
        || path.starts_with("/api/v1/docs/")
}

/// Request gate. Every non-public request needs a bearer token that the
/// introspection endpoint accepts; the resulting [`IdentityContext`] is
/// stored in the request extensions for [`AuthIdentity`] to pick up.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    match authenticate(&state.introspection, authorization.as_deref()).await {
        Ok(identity) => {
            metrics::track_introspection("authorized");
            debug!(subject = ?identity.subject(), "Request authorized");
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(rejection) => {
            metrics::track_introspection(rejection.outcome());
            match &rejection {
                AuthRejection::InvalidCredential(err) => warn!(
                    kind = err.kind(),
                    error = %err,
                    method = %req.method(),
                    path = %req.uri().path(),
                    "Token introspection failed"
                ),
                AuthRejection::MissingCredential => warn!(
                    kind = "missing",
                    method = %req.method(),
                    path = %req.uri().path(),
                    "Missing bearer token"
                ),
            }
            Err(AppError::unauthorized(rejection.message()))
        }
    }
}

/// Extractor for the identity attached by [`require_bearer`].
#[derive(Debug, Clone)]
pub struct AuthIdentity(pub IdentityContext);

impl AuthIdentity {
    pub fn subject(&self) -> Option<&str> {
        self.0.subject()
    }
}

impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityContext>()
            .cloned()
            .map(AuthIdentity)
            .ok_or_else(|| AppError::unauthorized(MISSING_BEARER_TOKEN))
    }
}
