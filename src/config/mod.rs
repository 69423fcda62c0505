//! Configuration types for the BigCommerce client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: immutable settings captured when a client is built
//! - [`ClientConfigBuilder`]: builder for [`ClientConfig`]
//! - [`StoreHash`], [`ChannelId`]: validated identifiers
//! - [`CustomerImpersonationToken`], [`AccessToken`]: credentials with masked debug output
//! - [`ChannelResolver`]: per-request channel selection
//!
//! # Example
//!
//! ```rust
//! use catalyst_client::{AccessToken, ChannelId, ClientConfig, CustomerImpersonationToken, StoreHash};
//!
//! let config = ClientConfig::builder()
//!     .store_hash(StoreHash::new("abc123").unwrap())
//!     .channel_id(ChannelId::new("1").unwrap())
//!     .customer_impersonation_token(CustomerImpersonationToken::new("tok").unwrap())
//!     .access_token(AccessToken::new("admin-tok").unwrap())
//!     .logger(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.graphql_api_domain(), "mybigcommerce.com");
//! ```

mod channel;
mod newtypes;

pub use channel::{async_resolver_fn, resolver_fn, AsyncFnResolver, ChannelResolver, FnResolver};
pub use newtypes::{AccessToken, ChannelId, CustomerImpersonationToken, StoreHash};

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;

/// Default domain for Storefront GraphQL endpoints.
pub const DEFAULT_GRAPHQL_API_DOMAIN: &str = "mybigcommerce.com";

/// Default host for the REST Management API.
pub const DEFAULT_ADMIN_API_HOST: &str = "api.bigcommerce.com";

/// Environment variable names read by [`ClientConfig::from_env`].
pub mod env {
    /// Store hash.
    pub const STORE_HASH: &str = "BIGCOMMERCE_STORE_HASH";
    /// Default channel id.
    pub const CHANNEL_ID: &str = "BIGCOMMERCE_CHANNEL_ID";
    /// Customer impersonation token.
    pub const CUSTOMER_IMPERSONATION_TOKEN: &str = "BIGCOMMERCE_CUSTOMER_IMPERSONATION_TOKEN";
    /// Management API access token.
    pub const ACCESS_TOKEN: &str = "BIGCOMMERCE_ACCESS_TOKEN";
    /// GraphQL API domain override.
    pub const GRAPHQL_API_DOMAIN: &str = "BIGCOMMERCE_GRAPHQL_API_DOMAIN";
    /// Management API host override.
    pub const ADMIN_API_HOST: &str = "BIGCOMMERCE_ADMIN_API_HOST";
}

/// Configuration for a BigCommerce [`Client`](crate::Client).
///
/// A config always carries at least one way of choosing a channel: a default
/// [`ChannelId`], a [`ChannelResolver`], or both. The builder rejects a config
/// with neither.
///
/// `ClientConfig` is cheap to clone; the resolver is shared through an `Arc`.
#[derive(Clone)]
pub struct ClientConfig {
    store_hash: StoreHash,
    channel_id: Option<ChannelId>,
    customer_impersonation_token: CustomerImpersonationToken,
    access_token: AccessToken,
    platform: Option<String>,
    backend_user_agent_extensions: Option<String>,
    logger: bool,
    channel_resolver: Option<Arc<dyn ChannelResolver>>,
    graphql_api_domain: String,
    admin_api_host: String,
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Loads a configuration from the process environment.
    ///
    /// See [`env`] for the variable names. Empty values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvironmentVariable`] when the store hash
    /// or either token is unset, [`ConfigError::MissingChannelId`] when no
    /// channel id is set, or a validation error for malformed values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads a configuration through an arbitrary variable lookup.
    ///
    /// This is [`from_env`](Self::from_env) with the source abstracted, which
    /// is handy for secrets managers and for tests.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require = |name: &'static str| {
            read(name).ok_or(ConfigError::MissingEnvironmentVariable { name })
        };

        let mut builder = ClientConfigBuilder::new()
            .store_hash(StoreHash::new(require(env::STORE_HASH)?)?)
            .customer_impersonation_token(CustomerImpersonationToken::new(require(
                env::CUSTOMER_IMPERSONATION_TOKEN,
            )?)?)
            .access_token(AccessToken::new(require(env::ACCESS_TOKEN)?)?);

        if let Some(channel_id) = read(env::CHANNEL_ID) {
            builder = builder.channel_id(ChannelId::new(channel_id)?);
        }
        if let Some(domain) = read(env::GRAPHQL_API_DOMAIN) {
            builder = builder.graphql_api_domain(domain);
        }
        if let Some(host) = read(env::ADMIN_API_HOST) {
            builder = builder.admin_api_host(host);
        }

        builder.build()
    }

    /// Returns the store hash.
    #[must_use]
    pub const fn store_hash(&self) -> &StoreHash {
        &self.store_hash
    }

    /// Returns the default channel id, if configured.
    #[must_use]
    pub const fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }

    /// Returns the customer impersonation token.
    #[must_use]
    pub const fn customer_impersonation_token(&self) -> &CustomerImpersonationToken {
        &self.customer_impersonation_token
    }

    /// Returns the Management API access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the platform name reported in the backend user agent.
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Returns extra user-agent segments, if configured.
    #[must_use]
    pub fn backend_user_agent_extensions(&self) -> Option<&str> {
        self.backend_user_agent_extensions.as_deref()
    }

    /// Returns whether per-request logging is enabled.
    #[must_use]
    pub const fn logger(&self) -> bool {
        self.logger
    }

    /// Returns the channel resolver, if configured.
    #[must_use]
    pub fn channel_resolver(&self) -> Option<&Arc<dyn ChannelResolver>> {
        self.channel_resolver.as_ref()
    }

    /// Returns the GraphQL API domain.
    #[must_use]
    pub fn graphql_api_domain(&self) -> &str {
        &self.graphql_api_domain
    }

    /// Returns the Management API host.
    #[must_use]
    pub fn admin_api_host(&self) -> &str {
        &self.admin_api_host
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("store_hash", &self.store_hash)
            .field("channel_id", &self.channel_id)
            .field(
                "customer_impersonation_token",
                &self.customer_impersonation_token,
            )
            .field("access_token", &self.access_token)
            .field("platform", &self.platform)
            .field(
                "backend_user_agent_extensions",
                &self.backend_user_agent_extensions,
            )
            .field("logger", &self.logger)
            .field("channel_resolver", &self.channel_resolver.is_some())
            .field("graphql_api_domain", &self.graphql_api_domain)
            .field("admin_api_host", &self.admin_api_host)
            .finish()
    }
}

/// Builder for constructing [`ClientConfig`] instances.
///
/// Required: `store_hash`, `customer_impersonation_token`, `access_token`, and
/// at least one of `channel_id` or `channel_resolver`.
///
/// # Defaults
///
/// - `logger`: `false`
/// - `graphql_api_domain`: [`DEFAULT_GRAPHQL_API_DOMAIN`]
/// - `admin_api_host`: [`DEFAULT_ADMIN_API_HOST`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    store_hash: Option<StoreHash>,
    channel_id: Option<ChannelId>,
    customer_impersonation_token: Option<CustomerImpersonationToken>,
    access_token: Option<AccessToken>,
    platform: Option<String>,
    backend_user_agent_extensions: Option<String>,
    logger: Option<bool>,
    channel_resolver: Option<Arc<dyn ChannelResolver>>,
    graphql_api_domain: Option<String>,
    admin_api_host: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store hash (required).
    #[must_use]
    pub fn store_hash(mut self, store_hash: StoreHash) -> Self {
        self.store_hash = Some(store_hash);
        self
    }

    /// Sets the default channel id.
    #[must_use]
    pub fn channel_id(mut self, channel_id: ChannelId) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    /// Sets the customer impersonation token (required).
    #[must_use]
    pub fn customer_impersonation_token(mut self, token: CustomerImpersonationToken) -> Self {
        self.customer_impersonation_token = Some(token);
        self
    }

    /// Sets the Management API access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the platform name reported in the backend user agent.
    #[must_use]
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Appends extra segments to the backend user agent.
    #[must_use]
    pub fn backend_user_agent_extensions(mut self, extensions: impl Into<String>) -> Self {
        self.backend_user_agent_extensions = Some(extensions.into());
        self
    }

    /// Enables or disables per-request logging.
    #[must_use]
    pub const fn logger(mut self, enabled: bool) -> Self {
        self.logger = Some(enabled);
        self
    }

    /// Sets a resolver consulted for every request without an explicit channel id.
    #[must_use]
    pub fn channel_resolver(mut self, resolver: impl ChannelResolver + 'static) -> Self {
        self.channel_resolver = Some(Arc::new(resolver));
        self
    }

    /// Overrides the GraphQL API domain.
    #[must_use]
    pub fn graphql_api_domain(mut self, domain: impl Into<String>) -> Self {
        self.graphql_api_domain = Some(domain.into());
        self
    }

    /// Overrides the Management API host.
    #[must_use]
    pub fn admin_api_host(mut self, host: impl Into<String>) -> Self {
        self.admin_api_host = Some(host.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] for a missing store hash or
    /// token, [`ConfigError::MissingChannelId`] when neither a channel id nor a
    /// resolver is set, and [`ConfigError::InvalidHost`] for a malformed domain
    /// or host override.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let store_hash = self
            .store_hash
            .ok_or(ConfigError::MissingRequiredField {
                field: "store_hash",
            })?;
        let customer_impersonation_token =
            self.customer_impersonation_token
                .ok_or(ConfigError::MissingRequiredField {
                    field: "customer_impersonation_token",
                })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        if self.channel_id.is_none() && self.channel_resolver.is_none() {
            return Err(ConfigError::MissingChannelId);
        }

        let graphql_api_domain = validate_host(
            self.graphql_api_domain
                .unwrap_or_else(|| DEFAULT_GRAPHQL_API_DOMAIN.to_string()),
        )?;
        let admin_api_host = validate_host(
            self.admin_api_host
                .unwrap_or_else(|| DEFAULT_ADMIN_API_HOST.to_string()),
        )?;

        Ok(ClientConfig {
            store_hash,
            channel_id: self.channel_id,
            customer_impersonation_token,
            access_token,
            platform: self.platform,
            backend_user_agent_extensions: self.backend_user_agent_extensions,
            logger: self.logger.unwrap_or(false),
            channel_resolver: self.channel_resolver,
            graphql_api_domain,
            admin_api_host,
        })
    }
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("store_hash", &self.store_hash)
            .field("channel_id", &self.channel_id)
            .field("logger", &self.logger)
            .field("channel_resolver", &self.channel_resolver.is_some())
            .finish_non_exhaustive()
    }
}

/// Accepts a bare host (optionally with a port); rejects schemes and paths.
fn validate_host(host: String) -> Result<String, ConfigError> {
    let trimmed = host.trim();
    let valid = !trimmed.is_empty()
        && !trimmed.starts_with('.')
        && !trimmed.ends_with('.')
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'));
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidHost { host })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn required_builder() -> ClientConfigBuilder {
        ClientConfig::builder()
            .store_hash(StoreHash::new("abc123").unwrap())
            .customer_impersonation_token(CustomerImpersonationToken::new("tok").unwrap())
            .access_token(AccessToken::new("admin-tok").unwrap())
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_builder_requires_channel_id_or_resolver() {
        let result = required_builder().build();
        assert!(matches!(result, Err(ConfigError::MissingChannelId)));
    }

    #[test]
    fn test_builder_accepts_resolver_without_channel_id() {
        let config = required_builder()
            .channel_resolver(resolver_fn(|_: Option<&ChannelId>| ChannelId::from(5)))
            .build()
            .unwrap();

        assert!(config.channel_id().is_none());
        assert!(config.channel_resolver().is_some());
    }

    #[test]
    fn test_builder_requires_store_hash() {
        let result = ClientConfig::builder()
            .channel_id(ChannelId::from(1))
            .customer_impersonation_token(CustomerImpersonationToken::new("tok").unwrap())
            .access_token(AccessToken::new("admin-tok").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "store_hash"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = required_builder()
            .channel_id(ChannelId::from(1))
            .build()
            .unwrap();

        assert!(!config.logger());
        assert_eq!(config.graphql_api_domain(), DEFAULT_GRAPHQL_API_DOMAIN);
        assert_eq!(config.admin_api_host(), DEFAULT_ADMIN_API_HOST);
        assert!(config.platform().is_none());
        assert!(config.backend_user_agent_extensions().is_none());
    }

    #[test]
    fn test_builder_rejects_host_with_scheme() {
        let result = required_builder()
            .channel_id(ChannelId::from(1))
            .admin_api_host("https://api.bigcommerce.com")
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidHost { .. })));
    }

    #[test]
    fn test_debug_masks_tokens() {
        let config = required_builder()
            .channel_id(ChannelId::from(1))
            .build()
            .unwrap();

        let debug = format!("{config:?}");
        assert!(debug.contains("ClientConfig"));
        assert!(debug.contains("abc123"));
        assert!(!debug.contains("admin-tok"));
        assert!(!debug.contains("\"tok\""));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (env::STORE_HASH, "abc123"),
            (env::CHANNEL_ID, "1"),
            (env::CUSTOMER_IMPERSONATION_TOKEN, "tok"),
            (env::ACCESS_TOKEN, "admin-tok"),
            (env::GRAPHQL_API_DOMAIN, "integration.zone"),
            (env::ADMIN_API_HOST, "api.integration.zone"),
        ]))
        .unwrap();

        assert_eq!(config.store_hash().as_ref(), "abc123");
        assert_eq!(config.channel_id().map(AsRef::as_ref), Some("1"));
        assert_eq!(config.access_token().as_ref(), "admin-tok");
        assert_eq!(config.graphql_api_domain(), "integration.zone");
        assert_eq!(config.admin_api_host(), "api.integration.zone");
    }

    #[test]
    fn test_from_lookup_reports_missing_variable() {
        let result = ClientConfig::from_lookup(lookup_from(&[
            (env::STORE_HASH, "abc123"),
            (env::CHANNEL_ID, "1"),
            (env::ACCESS_TOKEN, "admin-tok"),
        ]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingEnvironmentVariable {
                name: env::CUSTOMER_IMPERSONATION_TOKEN
            }
        );
    }

    #[test]
    fn test_from_lookup_treats_empty_channel_as_missing() {
        let result = ClientConfig::from_lookup(lookup_from(&[
            (env::STORE_HASH, "abc123"),
            (env::CHANNEL_ID, ""),
            (env::CUSTOMER_IMPERSONATION_TOKEN, "tok"),
            (env::ACCESS_TOKEN, "admin-tok"),
        ]));

        assert_eq!(result.unwrap_err(), ConfigError::MissingChannelId);
    }

    #[test]
    fn test_config_is_send_sync_and_clone() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<ClientConfig>();
    }
}
