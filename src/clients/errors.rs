//! Request-time error types.
//!
//! - [`BigCommerceApiError`]: non-2xx response from the Storefront GraphQL API
//! - [`AdminApiError`]: non-2xx response from the REST Management API
//! - [`ClientError`]: unified error returned by every [`Client`](crate::Client) call
//!
//! GraphQL field errors (an `errors` array inside an HTTP 200 body) are not
//! errors at this layer; they are left for callers to inspect.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalyst_client::ClientError;
//!
//! match client.fetch(request).await {
//!     Ok(response) => println!("{:?}", response.data),
//!     Err(ClientError::Api(e)) => println!("BigCommerce returned {}: {:?}", e.status, e.body),
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::error::ConfigError;

/// A non-successful response from the Storefront GraphQL API.
///
/// The response body is captured as JSON when it parses, and as a JSON string
/// holding the raw text otherwise.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("BigCommerce API error {status} ({status_text})")]
pub struct BigCommerceApiError {
    /// The HTTP status code.
    pub status: u16,
    /// The canonical reason phrase for the status, or an empty string.
    pub status_text: String,
    /// The response body, if one was returned.
    pub body: Option<serde_json::Value>,
}

impl BigCommerceApiError {
    /// Builds the error from a failed response, consuming its body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body = if text.is_empty() {
            None
        } else {
            Some(
                serde_json::from_str(&text)
                    .unwrap_or_else(|_| serde_json::Value::String(text)),
            )
        };

        Self {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        }
    }
}

/// A non-successful response from the REST Management API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{context}: {status_text}")]
pub struct AdminApiError {
    /// What the request was trying to do.
    pub context: &'static str,
    /// The HTTP status code.
    pub status: u16,
    /// The canonical reason phrase for the status.
    pub status_text: String,
}

/// Unified error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The Storefront GraphQL API returned a non-2xx status.
    #[error(transparent)]
    Api(#[from] BigCommerceApiError),

    /// The REST Management API returned a non-2xx status.
    #[error(transparent)]
    Admin(#[from] AdminApiError),

    /// The configuration cannot be used to make requests.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The document declares required variables that were not supplied.
    #[error("Missing required variables for operation '{operation}': {}", .missing.join(", "))]
    MissingVariables {
        /// The operation name (or `anonymous`).
        operation: String,
        /// Names of the missing variables.
        missing: Vec<String>,
    },

    /// A caller-supplied header name or value is not valid HTTP.
    #[error("Invalid header '{name}'")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// Variables could not be serialized, or a 2xx body could not be decoded.
    #[error("Failed to encode or decode JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// Returns the HTTP status for API and admin errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            Self::Admin(e) => Some(e.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_includes_status() {
        let error = BigCommerceApiError {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: Some(serde_json::json!({"title": "Internal Error"})),
        };
        assert_eq!(
            error.to_string(),
            "BigCommerce API error 500 (Internal Server Error)"
        );
    }

    #[test]
    fn test_admin_error_message_matches_context_and_status_text() {
        let error = AdminApiError {
            context: "Unable to get Shipping Zones",
            status: 401,
            status_text: "Unauthorized".to_string(),
        };
        assert_eq!(error.to_string(), "Unable to get Shipping Zones: Unauthorized");
    }

    #[test]
    fn test_missing_variables_lists_names() {
        let error = ClientError::MissingVariables {
            operation: "Search".to_string(),
            missing: vec!["term".to_string(), "first".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Missing required variables for operation 'Search': term, first"
        );
    }

    #[test]
    fn test_status_accessor() {
        let api: ClientError = BigCommerceApiError {
            status: 404,
            status_text: "Not Found".to_string(),
            body: None,
        }
        .into();
        assert_eq!(api.status(), Some(404));

        let admin: ClientError = AdminApiError {
            context: "Unable to get available Countries List",
            status: 403,
            status_text: "Forbidden".to_string(),
        }
        .into();
        assert_eq!(admin.status(), Some(403));

        let invalid = ClientError::InvalidHeader {
            name: "bad header".to_string(),
        };
        assert_eq!(invalid.status(), None);
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &ClientError::InvalidHeader {
            name: "x".to_string(),
        };
        let _: &dyn std::error::Error = &AdminApiError {
            context: "x",
            status: 500,
            status_text: String::new(),
        };
    }
}
