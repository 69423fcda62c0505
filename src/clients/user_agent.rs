//! Backend `User-Agent` derivation.

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Platform reported when none is configured.
pub const DEFAULT_PLATFORM: &str = "custom";

/// Builds the `User-Agent` sent with every GraphQL request.
///
/// Format: `catalyst-client-rs/<version>; platform/<platform>; Rust <rust-version>`,
/// followed by `; <extensions>` when extensions are given.
///
/// ```rust
/// use catalyst_client::clients::backend_user_agent;
///
/// let ua = backend_user_agent(Some("next"), Some("storefront/1.2"));
/// assert!(ua.starts_with("catalyst-client-rs/"));
/// assert!(ua.contains("platform/next"));
/// assert!(ua.ends_with("; storefront/1.2"));
/// ```
#[must_use]
pub fn backend_user_agent(platform: Option<&str>, extensions: Option<&str>) -> String {
    let platform = platform
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PLATFORM);
    let rust_version = env!("CARGO_PKG_RUST_VERSION");
    let mut user_agent =
        format!("catalyst-client-rs/{SDK_VERSION}; platform/{platform}; Rust {rust_version}");

    if let Some(extensions) = extensions.map(str::trim).filter(|e| !e.is_empty()) {
        user_agent.push_str("; ");
        user_agent.push_str(extensions);
    }

    user_agent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_platform_is_custom() {
        let ua = backend_user_agent(None, None);
        assert!(ua.contains("platform/custom"));
        assert!(ua.contains(SDK_VERSION));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let ua = backend_user_agent(Some("  "), Some(""));
        assert!(ua.contains("platform/custom"));
        assert!(!ua.ends_with("; "));
    }

    #[test]
    fn test_extensions_are_appended_last() {
        let ua = backend_user_agent(Some("axum"), Some("my-store/2.0"));
        assert!(ua.contains("platform/axum"));
        assert!(ua.ends_with("; my-store/2.0"));
    }
}
