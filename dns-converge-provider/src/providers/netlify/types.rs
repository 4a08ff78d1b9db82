//! Netlify API type definitions

use serde::{Deserialize, Serialize};

/// DNS zone as returned by `GET /dns_zones`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlifyZone {
    pub id: String,
    pub name: String,
}

/// DNS record as returned by `GET /dns_zones/{zone_id}/dns_records`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlifyDnsRecord {
    pub id: String,
    /// Fully-qualified owner name, without trailing dot
    pub hostname: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    #[serde(default)]
    pub ttl: Option<u32>,
    /// MX preference or SRV priority
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub weight: Option<u16>,
    #[serde(default)]
    pub port: Option<u16>,
    /// CAA flag
    #[serde(default)]
    pub flag: Option<u8>,
    /// CAA tag
    #[serde(default)]
    pub tag: Option<String>,
    /// `false` for records Netlify maintains itself (e.g. site records); those cannot be
    /// changed through the API.
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub dns_zone_id: String,
    #[serde(default)]
    pub site_id: Option<String>,
}

/// Request body of `POST /dns_zones/{zone_id}/dns_records`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlifyRecordCreate {
    #[serde(rename = "type")]
    pub record_type: String,
    pub hostname: String,
    pub value: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Error body returned with non-2xx responses (`{"code": 404, "message": "Not Found"}`).
/// The code repeats the HTTP status and is not read.
#[derive(Debug, Deserialize)]
pub struct NetlifyApiError {
    #[serde(default)]
    pub message: String,
}
