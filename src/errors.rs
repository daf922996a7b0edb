//! Error types for model validation and API calls.

use thiserror::Error;

/// Errors raised while constructing or validating a domain model.
///
/// Builder setters fail with `InvalidParameter` the moment they see a bad
/// value; `build()` fails with `MissingProperty` when a required field was
/// never set. Optional fields never produce `MissingProperty`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A required field was never supplied to the builder.
    #[error("missing property: {0} is a required property")]
    MissingProperty(&'static str),
    /// A field was supplied with a structurally invalid value.
    #[error("invalid parameter: {field} {expected}")]
    InvalidParameter {
        /// The name of the offending field.
        field: &'static str,
        /// What shape the field was expected to have.
        expected: &'static str,
    },
}

impl ModelError {
    pub(crate) fn invalid(field: &'static str, expected: &'static str) -> Self {
        ModelError::InvalidParameter { field, expected }
    }
}

/// Errors surfaced by API module functions.
///
/// Every failure is explicit: argument preconditions reject with
/// `InvalidParameter` before any network traffic, non-2xx responses become
/// `Api`, and connection-level failures become `Transport`. Nothing is
/// swallowed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An argument failed its precondition check; no request was sent.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A request body failed model validation; no request was sent.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// The server answered with a non-success status.
    #[error("{method} {url} failed with status {status}: {details}")]
    Api {
        /// The HTTP method of the failed request.
        method: &'static str,
        /// The full request URL.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// The response body, or a placeholder when it was empty.
        details: String,
    },
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_property_message_names_the_field() {
        let err = ModelError::MissingProperty("title");
        assert_eq!(
            err.to_string(),
            "missing property: title is a required property"
        );
    }

    #[test]
    fn invalid_parameter_message_names_field_and_shape() {
        let err = ModelError::invalid("id", "must be a valid UUID");
        assert_eq!(err.to_string(), "invalid parameter: id must be a valid UUID");
    }

    #[test]
    fn model_error_converts_into_client_error() {
        let err: ClientError = ModelError::MissingProperty("grantType").into();
        assert!(matches!(err, ClientError::Model(_)));
        assert_eq!(
            err.to_string(),
            "missing property: grantType is a required property"
        );
    }
}
