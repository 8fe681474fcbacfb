//! Error types for Library Desk

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::policy::PolicyViolation;

/// Application error codes returned in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    NoSuchData = 3,
    BadValue = 4,
    Duplicate = 5,
    RuleViolation = 6,
}

/// Per-field validation messages, keyed by input field name
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field. A later message for the same field replaces the earlier one.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Record `message` when `value` is empty or only whitespace
    pub fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())` when nothing was recorded, otherwise `AppError::InvalidForm`
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidForm(self))
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Please fix all errors before submitting: {0}")]
    InvalidForm(FormErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut form = FormErrors::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", first.code));
                form.add(field.to_string(), message);
            }
        }
        AppError::InvalidForm(form)
    }
}

impl From<PolicyViolation> for AppError {
    fn from(violation: PolicyViolation) -> Self {
        let mut form = FormErrors::new();
        form.add(violation.field(), violation.to_string());
        AppError::InvalidForm(form)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Field name to message, present for form validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub fields: Option<FormErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg, None)
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg, None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg, None),
            AppError::InvalidForm(form) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::BadValue,
                "Please fix all errors before submitting".to_string(),
                Some(form),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Duplicate, msg, None),
            AppError::BusinessRule(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::RuleViolation,
                msg,
                None,
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            fields,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_message_replaces_earlier_for_same_field() {
        let mut form = FormErrors::new();
        form.add("return_date", "Return date cannot be more than 15 days from issue date");
        form.add("return_date", "Return date cannot be before issue date");
        assert_eq!(form.len(), 1);
        assert_eq!(
            form.get("return_date"),
            Some("Return date cannot be before issue date")
        );
    }

    #[test]
    fn require_treats_whitespace_as_missing() {
        let mut form = FormErrors::new();
        form.require("name", "   ", "Name is required");
        form.require("username", "adm", "Username is required");
        assert_eq!(form.get("name"), Some("Name is required"));
        assert!(form.get("username").is_none());
        assert!(matches!(form.into_result(), Err(AppError::InvalidForm(_))));
    }

    #[test]
    fn invalid_form_maps_to_bad_request() {
        let mut form = FormErrors::new();
        form.add("name", "Name is required");
        let response = AppError::InvalidForm(form).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn business_rule_maps_to_unprocessable() {
        let response = AppError::BusinessRule("No copies available".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
