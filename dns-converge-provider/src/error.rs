use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diff::DiffError;

/// Error returned by a single call to the provider's API.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// Nothing in this crate retries these errors. [`NetworkError`](Self::NetworkError),
/// [`Timeout`](Self::Timeout) and [`RateLimited`](Self::RateLimited) are transient and the
/// caller may re-run the whole synchronization pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, 5xx gateway).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API token is invalid or expired.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The token is valid but lacks permission for the requested operation.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The specified DNS record was not found.
    RecordNotFound {
        /// Provider that produced the error.
        provider: String,
        /// ID of the record that was not found.
        record_id: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The specified zone was not found.
    DomainNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Zone name or identifier that was not found.
        domain: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected.
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the offending parameter.
        param: String,
        /// Why the parameter was rejected.
        detail: String,
    },

    /// The record type is not supported by this provider.
    UnsupportedRecordType {
        /// Provider that produced the error.
        provider: String,
        /// The unsupported record type string.
        record_type: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code (usually the HTTP status), if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether the error is caused by user input or account state rather than a fault.
    ///
    /// Returns `true` for errors that should be logged at `warn`, `false` for `error`.
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::RecordNotFound { .. }
                | Self::DomainNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::UnsupportedRecordType { .. }
        )
    }

    /// Name of the provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::RecordNotFound { provider, .. }
            | Self::DomainNotFound { provider, .. }
            | Self::InvalidParameter { provider, .. }
            | Self::UnsupportedRecordType { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::SerializationError { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => match raw_message {
                Some(msg) => write!(f, "[{provider}] Invalid credentials: {msg}"),
                None => write!(f, "[{provider}] Invalid credentials"),
            },
            Self::PermissionDenied {
                provider,
                raw_message,
            } => match raw_message {
                Some(msg) => write!(f, "[{provider}] Permission denied: {msg}"),
                None => write!(f, "[{provider}] Permission denied"),
            },
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_id}' not found")
            }
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => match raw_message {
                Some(msg) => write!(f, "[{provider}] Zone '{domain}' not found: {msg}"),
                None => write!(f, "[{provider}] Zone '{domain}' not found"),
            },
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::UnsupportedRecordType {
                provider,
                record_type,
            } => {
                write!(f, "[{provider}] Unsupported record type: {record_type}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => match retry_after {
                Some(secs) => write!(f, "[{provider}] Rate limited (retry after {secs}s)"),
                None => write!(f, "[{provider}] Rate limited"),
            },
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_code,
                raw_message,
            } => match raw_code {
                Some(code) => write!(f, "[{provider}] {raw_message} (code {code})"),
                None => write!(f, "[{provider}] {raw_message}"),
            },
        }
    }
}

impl std::error::Error for ProviderError {}

/// Error returned by the provider's inbound operations
/// (fetching zone records, generating corrections, constructing the provider).
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum SyncError {
    /// The provider could not be constructed (missing token, bad settings).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A live record is flagged by the provider as not manageable through the API.
    #[error("[{provider}] {hostname} in zone '{zone}' is not managed by the provider")]
    UnmanagedRecord {
        provider: String,
        hostname: String,
        zone: String,
    },

    /// A call to the provider's API failed.
    #[error(transparent)]
    Transport(#[from] ProviderError),

    /// The desired and observed record sets could not be compared.
    #[error("Diff error: {0}")]
    Diff(#[from] DiffError),
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Convenience type alias for `Result<T, SyncError>`.
pub type SyncResult<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "netlify".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[netlify] Network error: connection refused");
    }

    #[test]
    fn display_invalid_credentials_with_and_without_message() {
        let with = ProviderError::InvalidCredentials {
            provider: "netlify".to_string(),
            raw_message: Some("Access Denied".to_string()),
        };
        let without = ProviderError::InvalidCredentials {
            provider: "netlify".to_string(),
            raw_message: None,
        };
        assert_eq!(with.to_string(), "[netlify] Invalid credentials: Access Denied");
        assert_eq!(without.to_string(), "[netlify] Invalid credentials");
    }

    #[test]
    fn display_domain_not_found() {
        let e = ProviderError::DomainNotFound {
            provider: "netlify".to_string(),
            domain: "example.com".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[netlify] Zone 'example.com' not found");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ProviderError::RateLimited {
            provider: "netlify".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[netlify] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_unknown_with_code() {
        let e = ProviderError::Unknown {
            provider: "netlify".to_string(),
            raw_code: Some("500".to_string()),
            raw_message: "boom".to_string(),
        };
        assert_eq!(e.to_string(), "[netlify] boom (code 500)");
    }

    #[test]
    fn expected_vs_fault_classification() {
        assert!(
            ProviderError::UnsupportedRecordType {
                provider: "t".into(),
                record_type: "LOC".into(),
            }
            .is_expected()
        );
        assert!(
            !ProviderError::Timeout {
                provider: "t".into(),
                detail: "30s".into(),
            }
            .is_expected()
        );
    }

    #[test]
    fn provider_error_serde_round_trip() {
        let original = ProviderError::RateLimited {
            provider: "netlify".to_string(),
            retry_after: Some(60),
            raw_message: Some("slow down".to_string()),
        };
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        let back: ProviderError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), original.to_string());
    }

    #[test]
    fn sync_error_wraps_transport_transparently() {
        let inner = ProviderError::Timeout {
            provider: "netlify".to_string(),
            detail: "30s elapsed".to_string(),
        };
        let e: SyncError = inner.clone().into();
        assert_eq!(e.to_string(), inner.to_string());
        assert_eq!(e.to_string(), "[netlify] Request timeout: 30s elapsed");
    }

    #[test]
    fn sync_error_unmanaged_mentions_record_and_zone() {
        let e = SyncError::UnmanagedRecord {
            provider: "netlify".to_string(),
            hostname: "example.com".to_string(),
            zone: "example.com".to_string(),
        };
        let msg = e.to_string();
        assert!(msg.contains("example.com"));
        assert!(msg.contains("not managed"));
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"UnmanagedRecord\""));
    }
}
