//! Handler Types
//!
//! Request DTOs (which double as the validation schemas via `validator`
//! derives) and the success envelope shared by every handler. Deserializing
//! into these typed structs silently drops unknown fields, so nothing
//! unexpected reaches business logic.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::auth::users::UserRole;
use crate::middleware::RequestId;
use crate::validation::{password_strength, username_format};

/// Registration request.
///
/// Role is optional and defaults to `gamer`; elevated roles are normally
/// granted later through the privileged role-assignment path.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 30, message = "Username must be between 3 and 30 characters long"),
        custom(function = username_format)
    )]
    pub username: String,

    #[validate(
        email(message = "Please provide a valid email address"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: String,

    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters long"),
        custom(function = password_strength)
    )]
    pub password: String,

    #[validate(must_match(
        other = password,
        message = "Password confirmation does not match password"
    ))]
    pub confirm_password: String,

    pub role: Option<UserRole>,
}

/// Login request: password plus at least one of email / username.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_login_identifier))]
pub struct LoginRequest {
    #[validate(
        email(message = "Please provide a valid email address"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: Option<String>,

    #[validate(
        length(min = 3, max = 30, message = "Username must be between 3 and 30 characters long"),
        custom(function = username_format)
    )]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    pub remember_me: bool,
}

fn validate_login_identifier(request: &LoginRequest) -> Result<(), ValidationError> {
    if request.email.is_none() && request.username.is_none() {
        let mut error = ValidationError::new("identifier_required");
        error.message = Some("Either email or username is required".into());
        return Err(error);
    }
    Ok(())
}

/// Self-service profile update: username and/or email, never role.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_profile_update_not_empty))]
pub struct UpdateProfileRequest {
    #[validate(
        length(min = 3, max = 30, message = "Username must be between 3 and 30 characters long"),
        custom(function = username_format)
    )]
    pub username: Option<String>,

    #[validate(
        email(message = "Please provide a valid email address"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: Option<String>,
}

fn validate_profile_update_not_empty(request: &UpdateProfileRequest) -> Result<(), ValidationError> {
    if request.username.is_none() && request.email.is_none() {
        let mut error = ValidationError::new("empty_update");
        error.message = Some("At least one field must be provided".into());
        return Err(error);
    }
    Ok(())
}

/// Password change request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, max = 128, message = "Current password is required"))]
    pub current_password: String,

    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters long"),
        custom(function = password_strength)
    )]
    pub new_password: String,

    #[validate(must_match(
        other = new_password,
        message = "Password confirmation does not match new password"
    ))]
    pub confirm_password: String,
}

/// Privileged role assignment.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    pub role: UserRole,
}

/// Privileged activation toggle.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusRequest {
    pub is_active: bool,
}

/// Admin user-listing query parameters.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: u32,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: u32,

    pub role: Option<UserRole>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

/// Success envelope wrapping every successful response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Envelope with a data section.
    pub fn new(data: T, message: impl Into<String>, request_id: &RequestId) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: message.into(),
            request_id: request_id.0.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope with a message only.
    pub fn message_only(message: impl Into<String>, request_id: &RequestId) -> Self {
        ApiResponse {
            success: true,
            data: None,
            message: message.into(),
            request_id: request_id.0.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_collects_all_violations() {
        let request = RegisterRequest {
            username: "a!".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            confirm_password: "different".to_string(),
            role: None,
        };
        let errors = request.validate().unwrap_err();
        let fields: Vec<_> = errors.field_errors().keys().cloned().collect();
        assert!(fields.contains(&"username".into()));
        assert!(fields.contains(&"email".into()));
        assert!(fields.contains(&"password".into()));
        assert!(fields.contains(&"confirm_password".into()));
    }

    #[test]
    fn login_requires_some_identifier() {
        let request = LoginRequest {
            email: None,
            username: None,
            password: "Abcdef1!".to_string(),
            remember_me: false,
        };
        assert!(request.validate().is_err());

        let with_username = LoginRequest {
            email: None,
            username: Some("alice1".to_string()),
            password: "Abcdef1!".to_string(),
            remember_me: false,
        };
        assert!(with_username.validate().is_ok());
    }

    #[test]
    fn profile_update_requires_at_least_one_field() {
        let empty = UpdateProfileRequest {
            username: None,
            email: None,
        };
        assert!(empty.validate().is_err());

        let ok = UpdateProfileRequest {
            username: Some("alice2".to_string()),
            email: None,
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn unknown_fields_are_stripped_by_deserialization() {
        let value = serde_json::json!({
            "username": "alice1",
            "email": "a@x.com",
            "password": "Abcdef1!",
            "confirmPassword": "Abcdef1!",
            "isAdmin": true,
            "injected": "nope"
        });
        let request: RegisterRequest = serde_json::from_value(value).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.role, None);
    }
}
