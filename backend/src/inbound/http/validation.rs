//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every 400 produced here carries `details = { field, code }`, plus the
//! offending `value` for path parameters.

use serde_json::json;

use crate::domain::{Error, UserId, UserValidationError};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const USER_ID: FieldName = FieldName::new("id");

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }

    fn with_value(self, code: &str, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code,
        }))
    }
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field_name = field.as_str();
    ValidationError::new(field, format!("{field_name} must be a positive integer"))
        .with_value("invalid_id", value)
}

/// Parse a raw path segment into a [`UserId`].
pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    value
        .parse::<UserId>()
        .map_err(|_| invalid_id_error(field, value))
}

/// Render a domain validation failure as a 400.
pub(crate) fn user_validation_error(err: &UserValidationError) -> Error {
    let field = FieldName::new(err.field());
    ValidationError::new(field, err.to_string()).with_code(err.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn parse_user_id_accepts_positive_values() {
        let id = parse_user_id("17", USER_ID).expect("valid id");
        assert_eq!(id.as_i64(), 17);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    #[case("99999999999999999999")]
    fn parse_user_id_reports_the_value(#[case] raw: &str) {
        let err = parse_user_id(raw, USER_ID).expect_err("invalid id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "id", "value": raw, "code": "invalid_id" }))
        );
    }

    #[rstest]
    fn user_validation_errors_carry_field_and_code() {
        let err = user_validation_error(&UserValidationError::InvalidEmail);
        assert_eq!(err.message(), "email must look like local@domain.tld");
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "email", "code": "invalid_email" }))
        );
    }
}
