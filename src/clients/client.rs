//! The BigCommerce Storefront GraphQL client.
//!
//! [`Client`] issues exactly one HTTP request per call. It performs no
//! retries, batching, or response caching; failures are surfaced to the
//! caller as they happen.
//!
//! # Endpoint Format
//!
//! `https://store-{store_hash}-{channel_id}.{graphql_api_domain}/graphql`
//!
//! # Example
//!
//! ```rust,ignore
//! use catalyst_client::{create_client, ClientConfig};
//! use catalyst_client::clients::{Document, FetchRequest};
//! use serde_json::{json, Value};
//!
//! let client = create_client(ClientConfig::from_env()?)?;
//!
//! let product: Document<Value, Value> = Document::new(
//!     "query Product($id: Int!) { site { product(entityId: $id) { name } } }",
//! );
//! let response = client
//!     .fetch(FetchRequest::with_variables(&product, json!({ "id": 5 })).customer_id("42"))
//!     .await?;
//!
//! if let Some(data) = &response.data {
//!     println!("{}", data["site"]["product"]["name"]);
//! }
//! for message in response.error_messages() {
//!     eprintln!("GraphQL error: {message}");
//! }
//! ```

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, USER_AGENT,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::errors::{BigCommerceApiError, ClientError};
use crate::clients::logger::RequestLogger;
use crate::clients::operation::{operation_info, required_variables};
use crate::clients::request::{BigCommerceResponse, FetchOptions, FetchRequest, GraphqlRequestBody};
use crate::clients::user_agent::backend_user_agent;
use crate::config::{ChannelId, ClientConfig};
use crate::error::ConfigError;

/// Header naming the customer a request acts on behalf of.
pub const CUSTOMER_ID_HEADER: &str = "x-bc-customer-id";

/// Client for the BigCommerce Storefront GraphQL API and the REST
/// Management API helpers in [`admin`](crate::clients::admin).
///
/// # Thread Safety
///
/// `Client` is `Send + Sync`. Concurrent calls share only the immutable
/// configuration; share one client across tasks behind an `Arc`.
#[derive(Debug)]
pub struct Client {
    /// The internal reqwest HTTP client.
    pub(crate) http: reqwest::Client,
    /// Configuration captured at construction.
    pub(crate) config: ClientConfig,
    /// User agent derived once from the configuration.
    backend_user_agent: String,
    /// URL scheme of the GraphQL endpoint.
    scheme: &'static str,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

/// Creates a new client. Equivalent to [`Client::new`].
///
/// # Errors
///
/// See [`Client::new`].
pub fn create_client(config: ClientConfig) -> Result<Client, ClientError> {
    Client::new(config)
}

impl Client {
    /// Creates a new client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the configuration has no way to
    /// choose a channel, or [`ClientError::Network`] if the TLS backend cannot
    /// be initialised.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.channel_id().is_none() && config.channel_resolver().is_none() {
            return Err(ConfigError::MissingChannelId.into());
        }

        let backend_user_agent =
            backend_user_agent(config.platform(), config.backend_user_agent_extensions());
        let http = reqwest::Client::builder().use_rustls_tls().build()?;

        tracing::debug!(
            store_hash = %config.store_hash(),
            user_agent = %backend_user_agent,
            "BigCommerce client created"
        );

        Ok(Self {
            http,
            config,
            backend_user_agent,
            scheme: "https",
        })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the `User-Agent` sent with GraphQL requests.
    #[must_use]
    pub fn backend_user_agent(&self) -> &str {
        &self.backend_user_agent
    }

    /// Resolves the GraphQL endpoint for a request.
    ///
    /// An explicit `channel_id` is used verbatim. Otherwise the configured
    /// resolver is consulted with the default channel id, falling back to the
    /// default itself when no resolver is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] only if no channel can be chosen, which
    /// a built [`ClientConfig`] rules out.
    pub async fn graphql_endpoint(&self, channel_id: Option<&str>) -> Result<String, ClientError> {
        let channel = match channel_id {
            Some(channel) => channel.to_string(),
            None => self.resolve_channel_id().await?.to_string(),
        };

        Ok(format!(
            "{}://store-{}-{}.{}/graphql",
            self.scheme,
            self.config.store_hash(),
            channel,
            self.config.graphql_api_domain()
        ))
    }

    async fn resolve_channel_id(&self) -> Result<ChannelId, ClientError> {
        match (self.config.channel_resolver(), self.config.channel_id()) {
            (Some(resolver), default) => Ok(resolver.resolve_channel_id(default).await),
            (None, Some(default)) => Ok(default.clone()),
            (None, None) => Err(ConfigError::MissingChannelId.into()),
        }
    }

    /// Executes a GraphQL document.
    ///
    /// Sends one POST with `{ "query", "variables"? }` and returns the decoded
    /// `{ "data", "errors", "extensions" }` envelope. GraphQL errors that arrive
    /// with a 2xx status are returned in [`BigCommerceResponse::errors`], not as
    /// a [`ClientError`].
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingVariables`] if the operation declares required
    ///   variables that are absent or null; nothing is sent
    /// - [`ClientError::InvalidHeader`] for an unusable header name or value
    /// - [`ClientError::Network`] for transport failures and timeouts
    /// - [`ClientError::Api`] for any non-2xx status
    /// - [`ClientError::Decode`] if a 2xx body is not the expected shape
    pub async fn fetch<R, V>(
        &self,
        request: FetchRequest<'_, R, V>,
    ) -> Result<BigCommerceResponse<R>, ClientError>
    where
        R: DeserializeOwned,
        V: Serialize,
    {
        let (logger, url) = self
            .begin(request.document.as_str(), request.channel_id.as_deref())
            .await?;
        self.send(&url, request, logger).await
    }

    /// Starts request timing, then resolves the endpoint, so the logged
    /// duration includes channel resolution.
    async fn begin(
        &self,
        query: &str,
        channel_id: Option<&str>,
    ) -> Result<(RequestLogger, String), ClientError> {
        let logger = RequestLogger::start(self.config.logger(), query);
        let url = self.graphql_endpoint(channel_id).await?;
        Ok((logger, url))
    }

    /// Executes a request against an already resolved endpoint.
    #[cfg(test)]
    pub(crate) async fn fetch_from<R, V>(
        &self,
        url: &str,
        request: FetchRequest<'_, R, V>,
    ) -> Result<BigCommerceResponse<R>, ClientError>
    where
        R: DeserializeOwned,
        V: Serialize,
    {
        let logger = RequestLogger::start(self.config.logger(), request.document.as_str());
        self.send(url, request, logger).await
    }

    async fn send<R, V>(
        &self,
        url: &str,
        request: FetchRequest<'_, R, V>,
        logger: RequestLogger,
    ) -> Result<BigCommerceResponse<R>, ClientError>
    where
        R: DeserializeOwned,
        V: Serialize,
    {
        let FetchRequest {
            document,
            variables,
            customer_id,
            fetch_options,
            ..
        } = request;

        let query = document.normalized();
        let variables = variables
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;
        check_required_variables(&query, variables.as_ref())?;

        let headers = self.graphql_headers(customer_id.as_deref(), &fetch_options)?;
        let body = serde_json::to_vec(&GraphqlRequestBody { query, variables })?;

        let mut builder = self.http.post(url).headers(headers).body(body);
        if let Some(timeout) = fetch_options.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            return Err(BigCommerceApiError::from_response(response).await.into());
        }

        logger.finish(response.headers());

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Builds GraphQL request headers. Caller headers are applied last.
    fn graphql_headers(
        &self,
        customer_id: Option<&str>,
        fetch_options: &FetchOptions,
    ) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut authorization = header_value(
            AUTHORIZATION.as_str(),
            &format!(
                "Bearer {}",
                self.config.customer_impersonation_token().as_ref()
            ),
        )?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            USER_AGENT,
            header_value(USER_AGENT.as_str(), &self.backend_user_agent)?,
        );

        if let Some(customer_id) = customer_id {
            headers.insert(
                HeaderName::from_static(CUSTOMER_ID_HEADER),
                header_value(CUSTOMER_ID_HEADER, customer_id)?,
            );
        }

        if let Some(cache_control) = fetch_options.cache.and_then(|c| c.cache_control()) {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static(cache_control));
        }

        merge_headers(&mut headers, fetch_options)?;
        Ok(headers)
    }
}

/// Rejects calls missing variables the operation declares as required.
fn check_required_variables(
    query: &str,
    variables: Option<&serde_json::Value>,
) -> Result<(), ClientError> {
    let missing: Vec<String> = required_variables(query)
        .into_iter()
        .filter(|name| {
            variables
                .and_then(|v| v.get(name.as_str()))
                .map_or(true, serde_json::Value::is_null)
        })
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let operation = operation_info(query);
    tracing::debug!(
        operation = operation.display_name(),
        ?missing,
        "Rejecting GraphQL request with missing variables"
    );
    Err(ClientError::MissingVariables {
        operation: operation.display_name().to_string(),
        missing,
    })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader {
        name: name.to_string(),
    })
}

fn merge_headers(
    headers: &mut HeaderMap,
    fetch_options: &FetchOptions,
) -> Result<(), ClientError> {
    for (name, value) in &fetch_options.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| ClientError::InvalidHeader {
                name: name.clone(),
            })?;
        headers.insert(header_name, header_value(name, value)?);
    }
    Ok(())
}
