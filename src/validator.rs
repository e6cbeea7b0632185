use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::{Uuid, Version};
use validator::{Validate, ValidationError, ValidationErrors};

use lessons_core::AppError;

pub const UUID_V4_EXPECTED: &str = "Validation failed (uuid v4 is expected)";

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().filter_map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .or_else(|| Some(format!("{} is invalid", field)))
            })
        })
        .collect();

    messages.sort();
    messages.join(", ")
}

/// Rejects UUIDs that are not version 4.
pub fn validate_uuid_v4(id: &Uuid) -> Result<(), ValidationError> {
    if id.get_version() == Some(Version::Random) {
        Ok(())
    } else {
        Err(ValidationError::new("uuid_v4"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                if error_msg.contains("missing field") {
                    let field = error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                        .unwrap_or("unknown");
                    return AppError::bad_request(anyhow!("{} is required", field));
                }

                if error_msg.contains("invalid type") {
                    return AppError::bad_request(anyhow!("Invalid field type in request"));
                }

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::bad_request(anyhow!(
                        "Missing 'Content-Type: application/json' header"
                    ));
                }

                if matches!(rejection, JsonRejection::JsonDataError(_)) {
                    return AppError::bad_request(anyhow!("Invalid field value in request"));
                }

                AppError::bad_request(anyhow!("Invalid request body"))
            })?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

/// Path parameters checked with `validator` before reaching a handler.
///
/// Any deserialization or rule failure is reported as a 400 with
/// [`UUID_V4_EXPECTED`], since every path parameter in the API is a v4 id.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(anyhow!(UUID_V4_EXPECTED)))?;

        value
            .validate()
            .map_err(|_| AppError::bad_request(anyhow!(UUID_V4_EXPECTED)))?;

        Ok(ValidatedPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(range(min = 0, message = "credits must not be negative"))]
        credits: i32,
        #[validate(length(min = 1))]
        description: String,
    }

    #[test]
    fn test_validate_uuid_v4() {
        assert!(validate_uuid_v4(&Uuid::new_v4()).is_ok());
        assert!(validate_uuid_v4(&Uuid::nil()).is_err());
        assert!(
            validate_uuid_v4(&Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap())
                .is_err()
        );
    }

    #[test]
    fn test_format_errors_uses_message_or_field_name() {
        let probe = Probe {
            credits: -1,
            description: String::new(),
        };
        let errors = probe.validate().unwrap_err();

        assert_eq!(
            format_errors(&errors),
            "credits must not be negative, description is invalid"
        );
    }
}
