//! Provider factory functions and metadata.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::SyncResult;
use crate::providers::NetlifyProvider;
use crate::traits::DnsServiceProvider;
use crate::types::{ProviderCredentials, ProviderMetadata, ProviderType};

/// Creates a [`DnsServiceProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_converge_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Netlify {
///     api_token: "your-token".to_string(),
///     api_base: None,
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> SyncResult<Arc<dyn DnsServiceProvider>> {
    match credentials {
        ProviderCredentials::Netlify {
            api_token,
            api_base: Some(api_base),
        } => Ok(Arc::new(NetlifyProvider::with_api_base(api_token, api_base)?)),
        ProviderCredentials::Netlify {
            api_token,
            api_base: None,
        } => Ok(Arc::new(NetlifyProvider::new(api_token)?)),
    }
}

/// Creates a provider from its registered name (`"NETLIFY"`, case-insensitive) and a flat
/// settings map, as found in a credentials file.
pub fn create_provider_from_settings(
    type_name: &str,
    settings: &HashMap<String, String>,
) -> SyncResult<Arc<dyn DnsServiceProvider>> {
    let provider_type: ProviderType = type_name.parse()?;
    let credentials = ProviderCredentials::from_map(provider_type, settings)?;
    log::debug!("Creating {provider_type} provider from settings: {credentials:?}");
    create_provider(credentials)
}

/// Returns metadata for all available providers.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![NetlifyProvider::metadata()]
}
