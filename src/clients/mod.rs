//! HTTP client types for BigCommerce API communication.
//!
//! This module provides the request layer on top of a validated
//! [`ClientConfig`](crate::ClientConfig): GraphQL documents, per-call
//! requests, the [`Client`] that sends them, and the errors they produce.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Client`]: Sends Storefront GraphQL requests and REST Management API reads
//! - [`Document`]: A GraphQL document typed by its result and variables
//! - [`FetchRequest`]: A single call: document, variables, customer, and options
//! - [`FetchOptions`]: Transport settings such as cache directive and headers
//! - [`BigCommerceResponse`]: The `{ "data": ... }` envelope of a successful call
//! - [`ClientError`]: Every failure a call can produce
//!
//! # Example
//!
//! ```rust,ignore
//! use catalyst_client::{create_client, ClientConfig};
//! use catalyst_client::clients::{Document, FetchRequest};
//! use serde_json::Value;
//!
//! let client = create_client(ClientConfig::from_env()?)?;
//!
//! let settings: Document<Value> = Document::new("query { site { settings { storeName } } }");
//! let response = client.fetch(FetchRequest::new(&settings)).await?;
//! ```
//!
//! # Request Behavior
//!
//! - Exactly one HTTP request per call; no retries
//! - Any non-2xx status is an error carrying the status and parsed body
//! - GraphQL `errors` returned with a 2xx status stay in the response for the caller

mod admin;
mod client;
mod document;
mod errors;
mod logger;
mod operation;
mod request;
mod user_agent;

pub use client::{create_client, Client, CUSTOMER_ID_HEADER};
pub use document::{normalize_query, Document, NoVariables, RawDocument};
pub use errors::{AdminApiError, BigCommerceApiError, ClientError};
pub use logger::COMPLEXITY_HEADER;
pub use operation::{
    operation_info, required_variables, variable_definitions, OperationInfo, OperationType,
    VariableDefinition,
};
pub use request::{
    BigCommerceResponse, CacheDirective, FetchOptions, FetchRequest, GraphqlRequestBody,
};
pub use user_agent::{backend_user_agent, DEFAULT_PLATFORM, SDK_VERSION};
