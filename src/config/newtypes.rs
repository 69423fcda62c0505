//! Validated newtype wrappers for configuration values.
//!
//! Store hashes and channel ids end up inside a host name
//! (`store-<hash>-<channel>.<domain>`), so both are restricted to characters
//! that are legal in a DNS label. Tokens only need to be non-empty, but their
//! `Debug` output is masked.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

fn is_host_label_safe(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// A validated BigCommerce store hash.
///
/// # Example
///
/// ```rust
/// use catalyst_client::StoreHash;
///
/// let hash = StoreHash::new("abc123").unwrap();
/// assert_eq!(hash.as_ref(), "abc123");
/// assert!(StoreHash::new("abc 123").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreHash(String);

impl StoreHash {
    /// Creates a new validated store hash. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreHash`] if the hash is empty or not
    /// host-label safe.
    pub fn new(hash: impl Into<String>) -> Result<Self, ConfigError> {
        let hash = hash.into().trim().to_string();
        if !is_host_label_safe(&hash) {
            return Err(ConfigError::InvalidStoreHash { hash });
        }
        Ok(Self(hash))
    }
}

impl AsRef<str> for StoreHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated storefront channel id.
///
/// # Example
///
/// ```rust
/// use catalyst_client::ChannelId;
///
/// let channel = ChannelId::new("1").unwrap();
/// assert_eq!(channel.to_string(), "1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    /// Creates a new validated channel id. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidChannelId`] if the id is empty or not
    /// host-label safe.
    pub fn new(channel_id: impl Into<String>) -> Result<Self, ConfigError> {
        let channel_id = channel_id.into().trim().to_string();
        if !is_host_label_safe(&channel_id) {
            return Err(ConfigError::InvalidChannelId { channel_id });
        }
        Ok(Self(channel_id))
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ChannelId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for ChannelId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ChannelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A customer impersonation token, sent as `Authorization: Bearer <token>`.
///
/// The `Debug` implementation masks the value:
///
/// ```rust
/// use catalyst_client::CustomerImpersonationToken;
///
/// let token = CustomerImpersonationToken::new("tok").unwrap();
/// assert_eq!(format!("{:?}", token), "CustomerImpersonationToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CustomerImpersonationToken(String);

impl CustomerImpersonationToken {
    /// Creates a new token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken {
                kind: "Customer impersonation token",
            });
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for CustomerImpersonationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CustomerImpersonationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomerImpersonationToken(*****)")
    }
}

/// A server-to-server API account token, sent as `X-Auth-Token`.
///
/// Like [`CustomerImpersonationToken`], the value is masked in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken {
                kind: "Access token",
            });
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_hash_rejects_empty_and_unsafe_values() {
        assert!(StoreHash::new("").is_err());
        assert!(StoreHash::new("   ").is_err());
        assert!(StoreHash::new("abc.123").is_err());
        assert!(StoreHash::new("abc/123").is_err());
        assert!(StoreHash::new("-abc").is_err());
    }

    #[test]
    fn test_store_hash_trims_whitespace() {
        let hash = StoreHash::new("  abc123 ").unwrap();
        assert_eq!(hash.as_ref(), "abc123");
    }

    #[test]
    fn test_channel_id_accepts_numeric_and_rejects_empty() {
        assert_eq!(ChannelId::new("1").unwrap().as_ref(), "1");
        assert_eq!(ChannelId::new("1724582").unwrap().as_ref(), "1724582");
        assert!(matches!(
            ChannelId::new(""),
            Err(ConfigError::InvalidChannelId { .. })
        ));
    }

    #[test]
    fn test_channel_id_from_integer() {
        assert_eq!(ChannelId::from(42).as_ref(), "42");
    }

    #[test]
    fn test_channel_id_deserialization_validates() {
        let channel: ChannelId = serde_json::from_str(r#""7""#).unwrap();
        assert_eq!(channel.as_ref(), "7");
        assert!(serde_json::from_str::<ChannelId>(r#""""#).is_err());
    }

    #[test]
    fn test_tokens_reject_empty() {
        assert!(CustomerImpersonationToken::new("").is_err());
        assert!(AccessToken::new("").is_err());
    }

    #[test]
    fn test_tokens_mask_value_in_debug() {
        let token = AccessToken::new("admin-tok").unwrap();
        let debug = format!("{:?}", token);
        assert_eq!(debug, "AccessToken(*****)");
        assert!(!debug.contains("admin-tok"));
    }
}
