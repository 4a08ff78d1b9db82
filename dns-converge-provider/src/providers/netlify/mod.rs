//! Netlify DNS Provider

mod error;
mod http;
mod provider;
mod translate;
mod types;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::diff::{Differ, SlotDiffer};
use crate::error::{Result, SyncError, SyncResult};

pub use http::NetlifyClient;
pub use translate::{qualify_target, record_from_native, record_to_create};
pub use types::{NetlifyDnsRecord, NetlifyRecordCreate, NetlifyZone};

pub(crate) use types::NetlifyApiError;

pub(crate) const NETLIFY_API_BASE: &str = "https://api.netlify.com/api/v1";
pub(crate) const PROVIDER_NAME: &str = "netlify";

/// Nameservers Netlify DNS serves every zone from.
pub const DEFAULT_NAMESERVERS: [&str; 4] = [
    "dns1.p04.nsone.net",
    "dns2.p04.nsone.net",
    "dns3.p04.nsone.net",
    "dns4.p04.nsone.net",
];

/// The four Netlify DNS API calls the provider is built on.
///
/// [`NetlifyClient`] implements it over HTTP; tests substitute an in-memory account.
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// `GET /dns_zones`
    async fn list_zones(&self) -> Result<Vec<NetlifyZone>>;

    /// `GET /dns_zones/{zone_id}/dns_records`
    async fn list_records(&self, zone_id: &str) -> Result<Vec<NetlifyDnsRecord>>;

    /// `POST /dns_zones/{zone_id}/dns_records`
    async fn create_record(
        &self,
        zone_id: &str,
        record: &NetlifyRecordCreate,
    ) -> Result<NetlifyDnsRecord>;

    /// `DELETE /dns_zones/{zone_id}/dns_records/{record_id}`
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}

/// Netlify DNS Provider
pub struct NetlifyProvider {
    pub(crate) api: Arc<dyn ZoneApi>,
    pub(crate) differ: Arc<dyn Differ>,
}

impl NetlifyProvider {
    /// Creates a provider talking to the public Netlify API.
    pub fn new(api_token: impl Into<String>) -> SyncResult<Self> {
        Self::with_api_base(api_token, NETLIFY_API_BASE)
    }

    /// Creates a provider talking to the Netlify API at `api_base`.
    pub fn with_api_base(
        api_token: impl Into<String>,
        api_base: impl Into<String>,
    ) -> SyncResult<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(SyncError::Configuration(
                "no Netlify token provided".to_string(),
            ));
        }
        let client = NetlifyClient::new(api_token, api_base)?;
        Ok(Self::with_api(Arc::new(client)))
    }

    /// Creates a provider on top of an arbitrary [`ZoneApi`].
    pub fn with_api(api: Arc<dyn ZoneApi>) -> Self {
        Self {
            api,
            differ: Arc::new(SlotDiffer),
        }
    }

    /// Replaces the set-difference primitive.
    #[must_use]
    pub fn with_differ(mut self, differ: Arc<dyn Differ>) -> Self {
        self.differ = differ;
        self
    }
}

impl fmt::Debug for NetlifyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetlifyProvider").finish_non_exhaustive()
    }
}
