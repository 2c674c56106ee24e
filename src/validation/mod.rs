//! Request Validation
//!
//! Declarative validation for inbound request data. The schema lives on the
//! request DTOs as `validator` derive attributes (bounds, email syntax,
//! cross-field `must_match`, struct-level rules); this module provides the
//! axum extractors that run deserialize-then-validate and classify every
//! failure as a `VALIDATION_ERROR` carrying the complete `(field, message)`
//! list — validation never aborts on the first violation.
//!
//! # Targets
//!
//! - [`ValidatedJson`] — request body
//! - [`ValidatedQuery`] — query string
//! - [`ValidatedPath`] — path parameters
//!
//! Unknown fields in body/query/params are dropped by typed
//! deserialization and never reach business logic. Headers are not a
//! validation target and pass through untouched.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::{ApiError, FieldError};

/// The symbols a password may (and must, at least once) contain.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// JSON body that has passed schema validation.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ApiError::validation(
                "Invalid request body",
                vec![FieldError::new("body", e.body_text())],
            )
        })?;
        value.validate().map_err(into_api_error)?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that has passed schema validation.
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::validation(
                    "Invalid query string",
                    vec![FieldError::new("query", e.body_text())],
                )
            })?;
        value.validate().map_err(into_api_error)?;
        Ok(ValidatedQuery(value))
    }
}

/// Path parameters with deserialization failures classified as validation
/// errors (for example a malformed UUID in `/api/users/{id}`).
pub struct ValidatedPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::validation(
                    "Invalid path parameter",
                    vec![FieldError::new("path", e.body_text())],
                )
            })?;
        Ok(ValidatedPath(value))
    }
}

/// Flatten `validator`'s error tree into the wire-format field list.
fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(violations) = kind {
            // Struct-level rules land under "__all__"; report them against
            // the body as a whole.
            let name = match field.as_ref() {
                "__all__" => "body",
                other => other,
            };
            for violation in violations {
                let message = violation
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {name}"));
                out.push(FieldError::new(name, message));
            }
        }
    }
    out.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    out
}

fn into_api_error(errors: ValidationErrors) -> ApiError {
    let fields = collect_field_errors(&errors);
    let message = match fields.as_slice() {
        [single] => single.message.clone(),
        _ => "Validation failed".to_string(),
    };
    ApiError::validation(message, fields)
}

/// Username rule: letters, digits and underscores only (length is a
/// separate bound on the schema).
pub fn username_format(username: &str) -> Result<(), ValidationError> {
    if username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        let mut error = ValidationError::new("username_format");
        error.message =
            Some("Username can only contain letters, numbers, and underscores".into());
        Err(error)
    }
}

/// Password acceptability rule: at least one lowercase letter, one uppercase
/// letter, one digit and one symbol from [`PASSWORD_SYMBOLS`].
pub fn password_strength(password: &str) -> Result<(), ValidationError> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if has_lower && has_upper && has_digit && has_symbol {
        Ok(())
    } else {
        let mut error = ValidationError::new("password_strength");
        error.message = Some(
            format!(
                "Password must contain at least one uppercase letter, one lowercase letter, \
                 one number, and one special character ({PASSWORD_SYMBOLS})"
            )
            .into(),
        );
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_format_accepts_word_characters() {
        assert!(username_format("alice_1").is_ok());
        assert!(username_format("ALICE99").is_ok());
    }

    #[test]
    fn username_format_rejects_punctuation_and_spaces() {
        assert!(username_format("alice!").is_err());
        assert!(username_format("al ice").is_err());
        assert!(username_format("alice-1").is_err());
    }

    #[test]
    fn password_strength_requires_all_four_classes() {
        assert!(password_strength("Abcdef1!").is_ok());
        assert!(password_strength("abcdef1!").is_err()); // no uppercase
        assert!(password_strength("ABCDEF1!").is_err()); // no lowercase
        assert!(password_strength("Abcdefg!").is_err()); // no digit
        assert!(password_strength("Abcdefg1").is_err()); // no symbol
    }

    #[test]
    fn password_symbol_must_come_from_the_allowed_set() {
        assert!(password_strength("Abcdef1#").is_err());
        assert!(password_strength("Abcdef1&").is_ok());
    }

    #[test]
    fn all_violations_are_collected() {
        use serde::Deserialize;
        use validator::Validate;

        #[derive(Debug, Deserialize, Validate)]
        struct Probe {
            #[validate(
                length(min = 3, message = "Username must be at least 3 characters long"),
                custom(function = crate::validation::username_format)
            )]
            username: String,
            #[validate(email(message = "Please provide a valid email address"))]
            email: String,
        }

        let probe = Probe {
            username: "a!".to_string(),
            email: "not-an-email".to_string(),
        };
        let err = into_api_error(probe.validate().unwrap_err());
        match err {
            ApiError::Validation { errors, .. } => {
                // Both username violations and the email violation show up.
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.field == "email"));
                assert!(errors.iter().filter(|e| e.field == "username").count() == 2);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
