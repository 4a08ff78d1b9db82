use async_trait::async_trait;

use crate::correction::Correction;
use crate::error::{ProviderError, SyncResult};
use crate::types::{DomainConfig, Nameserver, ProviderMetadata, Record};

/// Raw API error (internal use)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (the HTTP status for REST providers)
    pub code: Option<String>,
    /// Original error message
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Error context (internal use)
///
/// Identifies what a failed request was addressing, so a bare status code can be
/// turned into `RecordNotFound` vs `DomainNotFound`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Hostname of the record being written
    pub record_name: Option<String>,
    /// Provider ID of the record being deleted
    pub record_id: Option<String>,
    /// Zone name or ID
    pub domain: Option<String>,
}

/// Maps raw API failures onto [`ProviderError`] (internal use)
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier
    fn provider_name(&self) -> &'static str;

    /// Maps a raw API error to the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// A DNS provider driven from a desired zone description.
///
/// Every method issues its API calls strictly one after another; nothing is cached
/// between calls and nothing is retried.
#[async_trait]
pub trait DnsServiceProvider: Send + Sync {
    /// Provider identifier
    fn id(&self) -> &'static str;

    /// Provider metadata (type level)
    ///
    /// Available without an instance, e.g. to validate settings before construction.
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// The nameservers the provider serves `zone` from.
    async fn get_nameservers(&self, zone: &str) -> SyncResult<Vec<Nameserver>>;

    /// Reads the live records of `zone`.
    ///
    /// A zone that does not exist yields an empty list. Every returned record carries its
    /// [`OriginRef`](crate::OriginRef).
    async fn get_zone_records(&self, zone: &str) -> SyncResult<Vec<Record>>;

    /// Computes the corrections that turn the live zone into `dc`.
    ///
    /// Nothing is modified: the returned corrections are executed by the caller, in
    /// order. An empty list means the zone is already in the desired state.
    async fn get_domain_corrections(&self, dc: DomainConfig) -> SyncResult<Vec<Correction>>;
}
