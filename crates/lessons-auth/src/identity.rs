//! Identity context attached to authenticated requests.

use serde::Serialize;
use serde_json::Value;

/// Opaque payload returned by the introspection authority.
///
/// Empty when the authority answered 2xx without a JSON body, or with a body
/// that could not be parsed. The request is authorized either way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IdentityContext {
    payload: Option<Value>,
}

impl IdentityContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_payload(payload: Value) -> Self {
        Self {
            payload: Some(payload),
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// The `sub` claim, when the authority reports one.
    pub fn subject(&self) -> Option<&str> {
        self.payload.as_ref()?.get("sub")?.as_str()
    }

    /// The `active` flag, when the authority reports one.
    pub fn active(&self) -> Option<bool> {
        self.payload.as_ref()?.get("active")?.as_bool()
    }
}
