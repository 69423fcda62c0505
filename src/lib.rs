//! # Catalyst Client
//!
//! A Rust client for the BigCommerce Storefront GraphQL API, with a few
//! REST Management API helpers for data GraphQL does not expose.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for store hash, channel id, and API tokens
//! - Per-request channel selection through a [`ChannelResolver`](config::ChannelResolver)
//! - GraphQL [`Document`]s typed by result and variables, so a document that
//!   declares variables cannot be sent without them
//! - Optional timing and complexity logging through `tracing`
//! - REST helpers for countries, states, and shipping zones
//!
//! ## Quick Start
//!
//! ```rust
//! use catalyst_client::{
//!     AccessToken, ChannelId, ClientConfig, CustomerImpersonationToken, StoreHash,
//! };
//!
//! let config = ClientConfig::builder()
//!     .store_hash(StoreHash::new("abc123").unwrap())
//!     .channel_id(ChannelId::from(1))
//!     .customer_impersonation_token(CustomerImpersonationToken::new("cit").unwrap())
//!     .access_token(AccessToken::new("admin-token").unwrap())
//!     .platform("axum")
//!     .build()
//!     .unwrap();
//!
//! let client = catalyst_client::create_client(config).unwrap();
//! assert!(client.backend_user_agent().contains("platform/axum"));
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use catalyst_client::{Document, FetchRequest};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct ProductVariables {
//!     id: i64,
//! }
//!
//! #[derive(Deserialize)]
//! struct ProductData {
//!     site: serde_json::Value,
//! }
//!
//! static PRODUCT: Document<ProductData, ProductVariables> =
//!     Document::new("query Product($id: Int!) { site { product(entityId: $id) { name } } }");
//!
//! let response = client
//!     .fetch(FetchRequest::with_variables(&PRODUCT, ProductVariables { id: 5 }).customer_id("42"))
//!     .await?;
//! ```
//!
//! ## Channel Resolution
//!
//! ```rust
//! use catalyst_client::config::resolver_fn;
//! use catalyst_client::{
//!     AccessToken, ChannelId, ClientConfig, CustomerImpersonationToken, StoreHash,
//! };
//!
//! // No default channel: every request asks the resolver
//! let config = ClientConfig::builder()
//!     .store_hash(StoreHash::new("abc123").unwrap())
//!     .customer_impersonation_token(CustomerImpersonationToken::new("cit").unwrap())
//!     .access_token(AccessToken::new("admin-token").unwrap())
//!     .channel_resolver(resolver_fn(|_: Option<&ChannelId>| ChannelId::from(2)))
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **One request per call**: No retries, batching, or response caching

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ChannelId, ClientConfig, ClientConfigBuilder, CustomerImpersonationToken,
    StoreHash,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    create_client, AdminApiError, BigCommerceApiError, BigCommerceResponse, CacheDirective,
    Client, ClientError, Document, FetchOptions, FetchRequest, NoVariables, RawDocument,
};
