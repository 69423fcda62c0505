//! Per-request diagnostics.
//!
//! A [`RequestLogger`] is started before the request goes out and finished
//! once the response status is known. Finishing only reads headers and emits a
//! `tracing` event, so it cannot fail and never delays the caller on I/O.

use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;

use crate::clients::operation::{operation_info, OperationInfo};

/// Response header carrying the query complexity score.
pub const COMPLEXITY_HEADER: &str = "x-bc-graphql-complexity";

/// Records operation name, duration, and complexity for one request.
#[derive(Debug)]
pub(crate) enum RequestLogger {
    Disabled,
    Enabled {
        operation: OperationInfo,
        started: Instant,
    },
}

impl RequestLogger {
    /// Starts timing a request for `query`. Does nothing when `enabled` is false.
    pub(crate) fn start(enabled: bool, query: &str) -> Self {
        if !enabled {
            return Self::Disabled;
        }
        Self::Enabled {
            operation: operation_info(query),
            started: Instant::now(),
        }
    }

    /// Time since the request started, or `None` when logging is disabled.
    pub(crate) fn elapsed(&self) -> Option<Duration> {
        match self {
            Self::Enabled { started, .. } => Some(started.elapsed()),
            Self::Disabled => None,
        }
    }

    /// Emits the log line for a completed request.
    pub(crate) fn finish(self, headers: &HeaderMap) {
        let Some(elapsed) = self.elapsed() else {
            return;
        };
        let Self::Enabled { operation, .. } = self else {
            return;
        };

        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let complexity = complexity(headers);

        tracing::info!(
            operation_type = %operation.operation_type,
            operation_name = operation.display_name(),
            duration_ms,
            complexity,
            "[BigCommerce] {} {} - {}ms - complexity {}",
            operation.operation_type,
            operation.display_name(),
            duration_ms,
            complexity,
        );
    }
}

/// Reads the complexity header, falling back to `"unknown"`.
pub(crate) fn complexity(headers: &HeaderMap) -> &str {
    headers
        .get(COMPLEXITY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_disabled_logger_skips_operation_parsing() {
        let logger = RequestLogger::start(false, "query Named { a }");
        assert!(matches!(logger, RequestLogger::Disabled));
        assert!(logger.elapsed().is_none());
        logger.finish(&HeaderMap::new());
    }

    #[test]
    fn test_enabled_logger_captures_operation() {
        let logger = RequestLogger::start(true, "mutation Logout { logout { result } }");
        match &logger {
            RequestLogger::Enabled { operation, .. } => {
                assert_eq!(operation.name.as_deref(), Some("Logout"));
            }
            RequestLogger::Disabled => panic!("expected enabled logger"),
        }
        logger.finish(&HeaderMap::new());
    }

    #[test]
    fn test_complexity_reads_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COMPLEXITY_HEADER, HeaderValue::from_static("42"));
        assert_eq!(complexity(&headers), "42");
    }

    #[test]
    fn test_complexity_defaults_to_unknown() {
        assert_eq!(complexity(&HeaderMap::new()), "unknown");
    }
}
