//! Request and response envelopes for [`Client::fetch`](crate::Client::fetch).
//!
//! [`FetchRequest`] carries a document, its variables, and per-call options.
//! Two constructors mirror the two ways a document can be called:
//!
//! - [`FetchRequest::new`] for `Document<R, NoVariables>`; variables cannot be passed
//! - [`FetchRequest::with_variables`] for `Document<R, V>`; variables must be passed
//!
//! so forgetting variables for a document that declares them is a compile error.
//!
//! # Example
//!
//! ```rust
//! use catalyst_client::clients::{CacheDirective, Document, FetchOptions, FetchRequest};
//! use serde_json::{json, Value};
//!
//! let settings: Document<Value> = Document::new("query { site { settings { storeName } } }");
//! let request = FetchRequest::new(&settings)
//!     .customer_id("42")
//!     .fetch_options(FetchOptions::new().cache(CacheDirective::NoStore));
//!
//! let product: Document<Value, Value> =
//!     Document::new("query Product($id: Int!) { site { product(entityId: $id) { name } } }");
//! let request = FetchRequest::with_variables(&product, json!({ "id": 5 })).channel_id("2");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clients::document::{Document, NoVariables, RawDocument};

/// Cache directive forwarded to the transport as a `Cache-Control` request header.
///
/// The names follow the Fetch standard's `RequestCache` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheDirective {
    /// Let intermediaries apply their normal caching. Sends no header.
    #[default]
    Default,
    /// Bypass and do not populate any cache (`no-store`).
    NoStore,
    /// Ignore cached responses and fetch fresh (`no-cache`).
    Reload,
    /// Revalidate cached responses with the origin (`no-cache`).
    NoCache,
    /// Prefer a cached response even if stale (`max-stale`).
    ForceCache,
    /// Only answer from cache (`only-if-cached`).
    OnlyIfCached,
}

impl CacheDirective {
    /// Returns the `Cache-Control` value for this directive, if it sends one.
    #[must_use]
    pub const fn cache_control(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::NoStore => Some("no-store"),
            Self::Reload | Self::NoCache => Some("no-cache"),
            Self::ForceCache => Some("max-stale"),
            Self::OnlyIfCached => Some("only-if-cached"),
        }
    }
}

/// Transport settings passed through to the underlying HTTP request.
///
/// Headers set here are applied after the client's defaults and replace them
/// on a name clash.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Cache directive; `None` sends nothing.
    pub cache: Option<CacheDirective>,
    /// Extra request headers.
    pub headers: HashMap<String, String>,
    /// Per-request timeout; `None` leaves the request unbounded.
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache directive.
    #[must_use]
    pub const fn cache(mut self, cache: CacheDirective) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A single call to [`Client::fetch`](crate::Client::fetch).
pub struct FetchRequest<'a, R, V = NoVariables> {
    pub(crate) document: &'a Document<R, V>,
    pub(crate) variables: Option<V>,
    pub(crate) customer_id: Option<String>,
    pub(crate) fetch_options: FetchOptions,
    pub(crate) channel_id: Option<String>,
}

impl<'a, R> FetchRequest<'a, R, NoVariables> {
    /// Creates a request for a document that declares no variables.
    #[must_use]
    pub fn new(document: &'a Document<R, NoVariables>) -> Self {
        Self::from_parts(document, None)
    }
}

impl<'a> FetchRequest<'a, serde_json::Value, serde_json::Value> {
    /// Creates a request for a [`RawDocument`] with optional variables.
    ///
    /// Required variables are checked at run time when the request is sent.
    #[must_use]
    pub fn raw(document: &'a RawDocument, variables: Option<serde_json::Value>) -> Self {
        Self::from_parts(document, variables)
    }
}

impl<'a, R, V> FetchRequest<'a, R, V> {
    /// Creates a request for a document that declares variables.
    #[must_use]
    pub fn with_variables(document: &'a Document<R, V>, variables: V) -> Self {
        Self::from_parts(document, Some(variables))
    }

    fn from_parts(document: &'a Document<R, V>, variables: Option<V>) -> Self {
        Self {
            document,
            variables,
            customer_id: None,
            fetch_options: FetchOptions::default(),
            channel_id: None,
        }
    }

    /// Acts on behalf of a customer via the `X-Bc-Customer-Id` header.
    ///
    /// An empty id is treated as no customer.
    #[must_use]
    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        let customer_id = customer_id.into();
        self.customer_id = (!customer_id.is_empty()).then_some(customer_id);
        self
    }

    /// Sets transport options.
    #[must_use]
    pub fn fetch_options(mut self, fetch_options: FetchOptions) -> Self {
        self.fetch_options = fetch_options;
        self
    }

    /// Sends this request to the given channel, bypassing the resolver.
    #[must_use]
    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }
}

impl<R, V: fmt::Debug> fmt::Debug for FetchRequest<'_, R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchRequest")
            .field("document", self.document)
            .field("variables", &self.variables)
            .field("customer_id", &self.customer_id)
            .field("fetch_options", &self.fetch_options)
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

/// The JSON body POSTed to the GraphQL endpoint.
///
/// `variables` is omitted entirely when absent rather than sent as `null`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GraphqlRequestBody {
    /// Normalized query text.
    pub query: String,
    /// Serialized variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

/// A successful GraphQL response: `{ "data": ..., "errors"?: [...], "extensions"?: {...} }`.
///
/// GraphQL may report field errors alongside HTTP 200, with `data` partially
/// filled or `null`. Those errors are not turned into [`ClientError`](crate::ClientError)s;
/// they are kept here for the caller to inspect.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BigCommerceResponse<R> {
    /// The operation result; `None` when the server returned `null` or omitted it.
    #[serde(default = "Option::default")]
    pub data: Option<R>,
    /// GraphQL errors returned with the response, in server order.
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    /// Server-defined extensions, if any.
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

impl<R> BigCommerceResponse<R> {
    /// Returns `true` if the response carries GraphQL errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the error messages, skipping entries without a `message`.
    #[must_use]
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|error| error.get("message").and_then(serde_json::Value::as_str))
            .collect()
    }
}
