//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyField,
    TooLong,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::EmptyField => "empty_field",
            ErrorCode::TooLong => "too_long",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        format!("missing required field: {field}"),
        ErrorCode::MissingField,
    )
}

/// Require an optional body field to be present.
pub(crate) fn require(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

impl From<UserValidationError> for Error {
    fn from(value: UserValidationError) -> Self {
        match value.max_length() {
            Some(max) => Error::invalid_request(value.to_string()).with_details(json!({
                "field": value.field(),
                "code": ErrorCode::TooLong.as_str(),
                "maxLength": max,
            })),
            None => field_error(value.field(), value.to_string(), ErrorCode::EmptyField),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_field_names_the_field() {
        let err = require(None, FieldName::new("email")).expect_err("missing");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "email");
        assert_eq!(details["code"], "missing_field");
        assert_eq!(err.message(), "missing required field: email");
    }

    #[rstest]
    fn present_field_passes_through() {
        let value = require(Some("alice".to_owned()), FieldName::new("username"))
            .expect("present");
        assert_eq!(value, "alice");
    }

    #[rstest]
    #[case(UserValidationError::EmptyUsername, "username")]
    #[case(UserValidationError::EmptyEmail, "email")]
    #[case(UserValidationError::EmptyName, "name")]
    fn empty_field_errors_are_invalid_requests(
        #[case] error: UserValidationError,
        #[case] field: &str,
    ) {
        let err = Error::from(error);
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], "empty_field");
    }

    #[rstest]
    fn too_long_errors_report_the_limit() {
        let err = Error::from(UserValidationError::UsernameTooLong { max: 50 });
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "username must be at most 50 characters");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "username");
        assert_eq!(details["code"], "too_long");
        assert_eq!(details["maxLength"], 50);
    }
}
