//! # dns-converge-provider
//!
//! Keeps a Netlify DNS zone in line with a declarative description of it.
//!
//! The provider reads the live records of a zone, compares them with the desired
//! records and produces an ordered list of [`Correction`]s. Each correction is a
//! described, deferred API call; nothing changes until the caller runs it.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_converge_provider::{
//!     apply_corrections, create_provider, DnsServiceProvider, DomainConfig,
//!     ProviderCredentials, Record, RecordType,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Netlify {
//!         api_token: "your-token".to_string(),
//!         api_base: None,
//!     })?;
//!
//!     let desired = DomainConfig::new(
//!         "example.com",
//!         vec![
//!             Record::new("www", "example.com", RecordType::A, "192.0.2.1").with_ttl(300),
//!             Record::txt("@", "example.com", "v=spf1 -all"),
//!         ],
//!     );
//!
//!     // Preview
//!     let corrections = provider.get_domain_corrections(desired).await?;
//!     for correction in &corrections {
//!         println!("{}", correction.msg());
//!     }
//!
//!     // Apply, in order
//!     apply_corrections(corrections).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Provider operations return [`SyncResult<T>`](SyncResult), i.e. a [`SyncError`]:
//!
//! - [`SyncError::Configuration`] — the provider could not be constructed
//! - [`SyncError::UnmanagedRecord`] — the zone holds a record Netlify does not let the
//!   API manage
//! - [`SyncError::Transport`] — an API call failed; wraps a [`ProviderError`]
//! - [`SyncError::Diff`] — the desired records could not be compared
//!
//! Running a correction returns a bare [`ProviderError`]. Nothing is retried: transient
//! errors (`NetworkError`, `Timeout`, `RateLimited`) are reported and a later pass picks
//! up where this one stopped.

mod correction;
mod diff;
mod error;
mod factory;
mod http_client;
mod providers;
mod reconcile;
mod traits;
mod txt;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

// Re-export error types
pub use error::{ProviderError, Result, SyncError, SyncResult};

// Re-export factory functions
pub use factory::{create_provider, create_provider_from_settings, get_all_provider_metadata};

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsServiceProvider;

// Re-export the reconciliation pipeline
pub use correction::{Correction, apply_corrections};
pub use diff::{Change, ChangeKind, Changeset, DiffError, Differ, SlotDiffer};
pub use reconcile::{PlannedAction, plan, prepare_desired, reconcile};
pub use txt::{MAX_TXT_CHUNK, decode_chunks, encode_chunks, split_long_txt, split_text};

// Re-export types
pub use types::{
    DEFAULT_TTL, DomainConfig, FieldType, Nameserver, OriginRef, ProviderCredentialField,
    ProviderCredentials, ProviderFeatures, ProviderMetadata, ProviderType, Record, RecordType,
    Slot,
};

// Re-export the Netlify provider and its API surface
pub use providers::netlify::{
    DEFAULT_NAMESERVERS, NetlifyClient, NetlifyDnsRecord, NetlifyRecordCreate, NetlifyZone,
    ZoneApi, qualify_target, record_from_native, record_to_create,
};
pub use providers::NetlifyProvider;
