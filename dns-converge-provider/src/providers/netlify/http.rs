//! Netlify HTTP request methods

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result, SyncResult};
use crate::http_client::HttpUtils;
use crate::providers::common::create_http_client;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::redact_secret;

use super::{
    NetlifyApiError, NetlifyDnsRecord, NetlifyRecordCreate, NetlifyZone, PROVIDER_NAME, ZoneApi,
};

/// HTTP implementation of [`ZoneApi`] with bearer-token authentication.
pub struct NetlifyClient {
    client: Client,
    api_token: String,
    api_base: String,
}

impl NetlifyClient {
    pub fn new(api_token: impl Into<String>, api_base: impl Into<String>) -> SyncResult<Self> {
        Ok(Self {
            client: create_http_client()?,
            api_token: api_token.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    fn records_path(zone_id: &str) -> String {
        format!("/dns_zones/{}/dns_records", urlencoding::encode(zone_id))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.api_token)
    }

    /// Sends the request and returns the body of a 2xx response, mapping everything else
    /// through [`ProviderErrorMapper`].
    async fn send(
        &self,
        request: RequestBuilder,
        method: &str,
        url: &str,
        context: ErrorContext,
    ) -> Result<String> {
        let (status, body) =
            HttpUtils::execute_request(self.authorized(request), PROVIDER_NAME, method, url)
                .await?;

        if (200..300).contains(&status) {
            return Ok(body);
        }

        let message = serde_json::from_str::<NetlifyApiError>(&body)
            .map(|e| e.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or(body);
        log::error!("[{PROVIDER_NAME}] API error (HTTP {status}): {message}");
        Err(self.map_error(
            RawApiError::with_code(status.to_string(), message),
            context,
        ))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, context: ErrorContext) -> Result<T> {
        let url = self.url(path);
        let body = self
            .send(self.client.get(&url), "GET", &url, context)
            .await?;
        HttpUtils::parse_json(&body, PROVIDER_NAME)
    }
}

impl fmt::Debug for NetlifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetlifyClient")
            .field("api_base", &self.api_base)
            .field("api_token", &redact_secret(&self.api_token))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ZoneApi for NetlifyClient {
    async fn list_zones(&self) -> Result<Vec<NetlifyZone>> {
        self.get("/dns_zones", ErrorContext::default()).await
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<NetlifyDnsRecord>> {
        let context = ErrorContext {
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        self.get(&Self::records_path(zone_id), context).await
    }

    async fn create_record(
        &self,
        zone_id: &str,
        record: &NetlifyRecordCreate,
    ) -> Result<NetlifyDnsRecord> {
        let url = self.url(&Self::records_path(zone_id));
        let body = serde_json::to_string(record).map_err(|e| ProviderError::SerializationError {
            provider: PROVIDER_NAME.to_string(),
            detail: e.to_string(),
        })?;
        log::debug!("[{PROVIDER_NAME}] Request Body: {body}");

        let context = ErrorContext {
            record_name: Some(record.hostname.clone()),
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        let request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        let response = self.send(request, "POST", &url, context).await?;
        HttpUtils::parse_json(&response, PROVIDER_NAME)
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let url = self.url(&format!(
            "{}/{}",
            Self::records_path(zone_id),
            urlencoding::encode(record_id)
        ));
        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        self.send(self.client.delete(&url), "DELETE", &url, context)
            .await?;
        Ok(())
    }
}
