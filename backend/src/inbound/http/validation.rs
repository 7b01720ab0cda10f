//! Shared validation helpers for inbound HTTP adapters.
//!
//! Validation failures become `invalid_request` errors whose `details` name
//! the offending field and a machine-readable code.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{
    ENROLLMENT_MESSAGE_MAX, EnrollmentMessage, EnrollmentMessageError, Error, TravelNumber,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    TooLong,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const TRAVEL_NUMBER: FieldName = FieldName::new("travelNumber");
pub(crate) const MESSAGE: FieldName = FieldName::new("message");
pub(crate) const LAST_VIEWED_AT: FieldName = FieldName::new("lastViewedAt");

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("{} is required", field.as_str()),
    )
}

pub(crate) fn require_travel_number(value: Option<i32>) -> Result<TravelNumber, Error> {
    value
        .map(TravelNumber::new)
        .ok_or_else(|| missing_field_error(TRAVEL_NUMBER))
}

/// Validate an optional enrollment message.
pub(crate) fn parse_enrollment_message(
    value: Option<String>,
) -> Result<Option<EnrollmentMessage>, Error> {
    value
        .map(EnrollmentMessage::new)
        .transpose()
        .map_err(|err| match err {
            EnrollmentMessageError::TooLong { length, .. } => Error::invalid_request(format!(
                "message must be at most {ENROLLMENT_MESSAGE_MAX} characters"
            ))
            .with_details(json!({
                "field": MESSAGE.as_str(),
                "code": ErrorCode::TooLong.as_str(),
                "length": length,
            })),
        })
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| {
            Error::invalid_request(format!("{} must be an RFC 3339 timestamp", field.as_str()))
                .with_details(json!({
                    "field": field.as_str(),
                    "value": value,
                    "code": ErrorCode::InvalidTimestamp.as_str(),
                }))
        })
}
