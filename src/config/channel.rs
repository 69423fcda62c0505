//! Per-call channel resolution.
//!
//! A storefront that serves several sales channels (for example one per
//! locale) can pick the channel at request time instead of baking a single
//! channel id into the client. The client calls the configured
//! [`ChannelResolver`] once per request that does not carry an explicit
//! channel id, handing it the configured default.
//!
//! Resolvers are shared across concurrent requests through `&self` and must
//! not rely on mutating shared state.
//!
//! # Example
//!
//! ```rust
//! use catalyst_client::config::{resolver_fn, ChannelResolver};
//! use catalyst_client::ChannelId;
//!
//! // Synchronous resolver: always route to channel 2.
//! let resolver = resolver_fn(|_default: Option<&ChannelId>| ChannelId::from(2));
//!
//! let resolved = tokio_test::block_on(resolver.resolve_channel_id(None));
//! assert_eq!(resolved.as_ref(), "2");
//! ```

use std::fmt;
use std::future::Future;

use async_trait::async_trait;

use crate::config::ChannelId;

/// Strategy for resolving the channel id of a request.
///
/// `default` is the channel id the client was configured with, if any.
#[async_trait]
pub trait ChannelResolver: Send + Sync {
    /// Returns the channel id to use for the next request.
    async fn resolve_channel_id(&self, default: Option<&ChannelId>) -> ChannelId;
}

/// Adapter turning a synchronous closure into a [`ChannelResolver`].
///
/// Created with [`resolver_fn`].
pub struct FnResolver<F>(F);

/// Wraps a synchronous closure as a [`ChannelResolver`].
pub const fn resolver_fn<F>(f: F) -> FnResolver<F>
where
    F: Fn(Option<&ChannelId>) -> ChannelId + Send + Sync,
{
    FnResolver(f)
}

#[async_trait]
impl<F> ChannelResolver for FnResolver<F>
where
    F: Fn(Option<&ChannelId>) -> ChannelId + Send + Sync,
{
    async fn resolve_channel_id(&self, default: Option<&ChannelId>) -> ChannelId {
        (self.0)(default)
    }
}

impl<F> fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnResolver")
    }
}

/// Adapter turning an async closure into a [`ChannelResolver`].
///
/// The closure receives an owned copy of the default so the returned future
/// does not borrow from the client. Created with [`async_resolver_fn`].
pub struct AsyncFnResolver<F>(F);

/// Wraps a closure returning a future as a [`ChannelResolver`].
///
/// ```rust
/// use catalyst_client::config::{async_resolver_fn, ChannelResolver};
/// use catalyst_client::ChannelId;
///
/// let resolver = async_resolver_fn(|default: Option<ChannelId>| async move {
///     default.unwrap_or_else(|| ChannelId::from(1))
/// });
///
/// let resolved = tokio_test::block_on(resolver.resolve_channel_id(None));
/// assert_eq!(resolved.as_ref(), "1");
/// ```
pub const fn async_resolver_fn<F, Fut>(f: F) -> AsyncFnResolver<F>
where
    F: Fn(Option<ChannelId>) -> Fut + Send + Sync,
    Fut: Future<Output = ChannelId> + Send,
{
    AsyncFnResolver(f)
}

#[async_trait]
impl<F, Fut> ChannelResolver for AsyncFnResolver<F>
where
    F: Fn(Option<ChannelId>) -> Fut + Send + Sync,
    Fut: Future<Output = ChannelId> + Send,
{
    async fn resolve_channel_id(&self, default: Option<&ChannelId>) -> ChannelId {
        (self.0)(default.cloned()).await
    }
}

impl<F> fmt::Debug for AsyncFnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncFnResolver")
    }
}
