//! Configuration error types for the BigCommerce client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured client fails at construction rather than on its first request.
//!
//! # Example
//!
//! ```rust
//! use catalyst_client::{ConfigError, StoreHash};
//!
//! let result = StoreHash::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidStoreHash { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither a default channel id nor a channel resolver was configured.
    #[error("Client configuration must include a channelId.")]
    MissingChannelId,

    /// A required builder field was never set.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is absent or empty.
    #[error("Missing required environment variable \"{name}\"")]
    MissingEnvironmentVariable {
        /// The environment variable name.
        name: &'static str,
    },

    /// The store hash is empty or contains characters not allowed in a host label.
    #[error("Invalid store hash '{hash}'. Expected a non-empty alphanumeric value (e.g., 'abc123').")]
    InvalidStoreHash {
        /// The rejected value.
        hash: String,
    },

    /// The channel id is empty or contains characters not allowed in a host label.
    #[error("Invalid channel id '{channel_id}'. Expected a non-empty value such as '1'.")]
    InvalidChannelId {
        /// The rejected value.
        channel_id: String,
    },

    /// An API token was empty.
    #[error("{kind} cannot be empty. Please provide a valid BigCommerce token.")]
    EmptyToken {
        /// Which token was empty.
        kind: &'static str,
    },

    /// A domain or host override was empty or malformed.
    #[error("Invalid host '{host}'. Expected a bare host name such as 'api.bigcommerce.com'.")]
    InvalidHost {
        /// The rejected value.
        host: String,
    },
}
