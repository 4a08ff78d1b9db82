use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};
use crate::utils::names::{normalize_domain_name, relative_to_full_name};

/// TTL applied by the record builders when none is given.
pub const DEFAULT_TTL: u32 = 3600;

// ============ DNS Record Types ============

/// DNS record type.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Text record.
    Txt,
    /// Certificate Authority Authorization record.
    Caa,
    /// SSH public key fingerprint record.
    Sshfp,
    /// Pointer record.
    Ptr,
    /// Name authority pointer record.
    Naptr,
    /// Delegation signer record.
    Ds,
    /// TLS authentication record.
    Tlsa,
    /// Apex alias pseudo-record.
    Alias,
}

impl RecordType {
    /// Uppercase wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Caa => "CAA",
            Self::Sshfp => "SSHFP",
            Self::Ptr => "PTR",
            Self::Naptr => "NAPTR",
            Self::Ds => "DS",
            Self::Tlsa => "TLSA",
            Self::Alias => "ALIAS",
        }
    }

    /// Types whose target is itself a domain name and is kept fully qualified.
    pub fn is_relational(self) -> bool {
        matches!(self, Self::Cname | Self::Mx | Self::Ns | Self::Srv)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Record Model ============

/// Where a record lives: its fully-qualified name and its type.
///
/// Several records may share a slot (round-robin A records, multiple MX hosts).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    /// Lowercased fully-qualified name without the trailing dot.
    pub fqdn: String,
    /// Record type.
    pub record_type: RecordType,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.fqdn, self.record_type)
    }
}

/// Read-only link from an observed record back to the provider record it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginRef {
    /// Provider-specific record identifier.
    pub record_id: String,
    /// Provider-specific zone identifier.
    pub zone_id: String,
}

/// A provider-neutral DNS resource record.
///
/// Desired records (built from the zone description) have no [`origin`](Self::origin);
/// observed records (read from the provider) always carry one. The origin is only used to
/// address a record when deleting it and never takes part in comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Label relative to the zone apex, `"@"` for the apex itself.
    pub name: String,
    /// Lowercased fully-qualified name without the trailing dot.
    pub name_fqdn: String,
    /// Record type.
    pub record_type: RecordType,
    /// Type-dependent payload. Fully qualified with a trailing dot for CNAME/MX/NS/SRV;
    /// the reassembled text for TXT.
    pub target: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// MX preference.
    pub mx_preference: u16,
    /// SRV priority.
    pub srv_priority: u16,
    /// SRV weight.
    pub srv_weight: u16,
    /// SRV port.
    pub srv_port: u16,
    /// CAA flag.
    pub caa_flag: u8,
    /// CAA property tag (`issue`, `issuewild`, `iodef`).
    pub caa_tag: String,
    /// TXT chunks as they are written to the provider. Empty for other types.
    pub txt_strings: Vec<String>,
    /// Back-reference to the native record; `None` for desired records.
    pub origin: Option<OriginRef>,
}

impl Record {
    /// Creates a desired record `label` in `zone`.
    ///
    /// For TXT records prefer [`Record::txt`], which also fills the chunk list.
    pub fn new(
        label: &str,
        zone: &str,
        record_type: RecordType,
        target: impl Into<String>,
    ) -> Self {
        let target = target.into();
        let txt_strings = if record_type == RecordType::Txt {
            vec![target.clone()]
        } else {
            Vec::new()
        };

        Self {
            name: label.to_lowercase(),
            name_fqdn: relative_to_full_name(label, zone).to_lowercase(),
            record_type,
            target,
            ttl: DEFAULT_TTL,
            mx_preference: 0,
            srv_priority: 0,
            srv_weight: 0,
            srv_port: 0,
            caa_flag: 0,
            caa_tag: String::new(),
            txt_strings,
            origin: None,
        }
    }

    /// Creates a desired TXT record holding `text` as a single chunk.
    pub fn txt(label: &str, zone: &str, text: impl Into<String>) -> Self {
        Self::new(label, zone, RecordType::Txt, text)
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_mx_preference(mut self, preference: u16) -> Self {
        self.mx_preference = preference;
        self
    }

    #[must_use]
    pub fn with_srv(mut self, priority: u16, weight: u16, port: u16) -> Self {
        self.srv_priority = priority;
        self.srv_weight = weight;
        self.srv_port = port;
        self
    }

    #[must_use]
    pub fn with_caa(mut self, flag: u8, tag: impl Into<String>) -> Self {
        self.caa_flag = flag;
        self.caa_tag = tag.into();
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: OriginRef) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Replaces the TXT chunks; the target becomes their concatenation.
    pub fn set_txt_strings(&mut self, chunks: Vec<String>) {
        self.target = chunks.concat();
        self.txt_strings = chunks;
    }

    /// The slot this record occupies.
    pub fn slot(&self) -> Slot {
        Slot {
            fqdn: normalize_domain_name(&self.name_fqdn).to_lowercase(),
            record_type: self.record_type,
        }
    }

    /// `true` for records built from the zone description.
    pub fn is_desired(&self) -> bool {
        self.origin.is_none()
    }

    /// Provider identifier of the native record this one was read from.
    pub fn origin_id(&self) -> Option<&str> {
        self.origin.as_ref().map(|o| o.record_id.as_str())
    }

    /// Compares type, TTL and the type-specific data. Chunk boundaries of TXT records,
    /// fields the type does not use, and the origin are ignored.
    pub fn same_content(&self, other: &Self) -> bool {
        self.record_type == other.record_type
            && self.ttl == other.ttl
            && self.content() == other.content()
    }

    /// Type-specific rendering of the record data, without name and TTL.
    pub fn content(&self) -> String {
        match self.record_type {
            RecordType::Mx => format!("{} {}", self.mx_preference, self.target),
            RecordType::Srv => format!(
                "{} {} {} {}",
                self.srv_priority, self.srv_weight, self.srv_port, self.target
            ),
            RecordType::Caa => format!("{} {} \"{}\"", self.caa_flag, self.caa_tag, self.target),
            RecordType::Txt => format!("\"{}\"", self.target),
            _ => self.target.clone(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ttl={}",
            self.record_type,
            self.name_fqdn,
            self.content(),
            self.ttl
        )
    }
}

// ============ Domain Types ============

/// The desired state of one zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Zone name (e.g. `"example.com"`).
    pub name: String,
    /// Desired records.
    pub records: Vec<Record>,
}

impl DomainConfig {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Lowercases the zone name and every record's qualified name, dropping trailing dots.
    pub fn normalize(&mut self) {
        self.name = normalize_domain_name(&self.name).to_lowercase();
        for record in &mut self.records {
            record.name_fqdn = normalize_domain_name(&record.name_fqdn).to_lowercase();
        }
    }
}

/// An authoritative nameserver for a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nameserver {
    /// Nameserver host name.
    pub name: String,
}

impl Nameserver {
    pub fn from_names(names: &[&str]) -> Vec<Self> {
        names
            .iter()
            .map(|n| Self {
                name: (*n).to_string(),
            })
            .collect()
    }
}

// ============ Provider Types ============

/// Identifies which DNS provider implementation to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Netlify DNS.
    Netlify,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Netlify => write!(f, "netlify"),
        }
    }
}

impl FromStr for ProviderType {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "netlify" => Ok(Self::Netlify),
            other => Err(SyncError::Configuration(format!(
                "unknown provider type: {other}"
            ))),
        }
    }
}

// ============ Provider Metadata Types ============

/// The input type of a credential field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single setting a provider needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Settings-map key (e.g., `"token"`).
    pub key: String,
    /// Human-readable label.
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether construction fails without it.
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// What a provider can and cannot manage.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct ProviderFeatures {
    pub can_use_alias: bool,
    pub can_use_caa: bool,
    pub can_use_naptr: bool,
    pub can_use_ds: bool,
    pub can_use_ptr: bool,
    pub can_use_sshfp: bool,
    pub can_use_srv: bool,
    pub can_use_tlsa: bool,
    pub can_auto_dnssec: bool,
    pub can_create_domains: bool,
    pub can_dual_host: bool,
    pub can_get_zones: bool,
    pub officially_supported: bool,
}

impl ProviderFeatures {
    /// Whether records of `record_type` can be managed through this provider.
    pub fn supports(&self, record_type: RecordType) -> bool {
        match record_type {
            RecordType::A
            | RecordType::Aaaa
            | RecordType::Cname
            | RecordType::Mx
            | RecordType::Ns
            | RecordType::Txt => true,
            RecordType::Srv => self.can_use_srv,
            RecordType::Caa => self.can_use_caa,
            RecordType::Sshfp => self.can_use_sshfp,
            RecordType::Ptr => self.can_use_ptr,
            RecordType::Naptr => self.can_use_naptr,
            RecordType::Ds => self.can_use_ds,
            RecordType::Tlsa => self.can_use_tlsa,
            RecordType::Alias => self.can_use_alias,
        }
    }
}

/// Static metadata describing a DNS provider.
///
/// Obtain via [`DnsServiceProvider::metadata()`](crate::DnsServiceProvider::metadata) or
/// [`get_all_provider_metadata()`](crate::get_all_provider_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    pub id: ProviderType,
    /// Name the provider is registered under in zone descriptions.
    pub registered_name: String,
    pub name: String,
    pub description: String,
    pub required_fields: Vec<ProviderCredentialField>,
    pub features: ProviderFeatures,
}

// ============ Credential Types ============

/// Type-safe credential container for supported providers.
///
/// Serialized as a tagged enum:
///
/// ```json
/// { "provider": "netlify", "credentials": { "api_token": "..." } }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    #[serde(rename = "netlify")]
    Netlify {
        /// Netlify personal access token.
        api_token: String,
        /// API endpoint override; `None` selects the public Netlify API.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_base: Option<String>,
    },
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Netlify { api_base, .. } => f
                .debug_struct("Netlify")
                .field("api_token", &"<REDACTED>")
                .field("api_base", api_base)
                .finish(),
        }
    }
}

impl ProviderCredentials {
    /// Builds credentials from a flat settings map, validating required fields.
    ///
    /// Netlify reads `token` (required) and `api_base` (optional).
    pub fn from_map(provider: ProviderType, map: &HashMap<String, String>) -> SyncResult<Self> {
        match provider {
            ProviderType::Netlify => {
                let api_token = match map.get("token") {
                    Some(v) if !v.trim().is_empty() => v.trim().to_string(),
                    _ => {
                        return Err(SyncError::Configuration(
                            "no Netlify token provided".to_string(),
                        ));
                    }
                };
                let api_base = map
                    .get("api_base")
                    .map(|v| v.trim().trim_end_matches('/').to_string())
                    .filter(|v| !v.is_empty());
                Ok(Self::Netlify {
                    api_token,
                    api_base,
                })
            }
        }
    }

    /// Returns the [`ProviderType`] corresponding to this credential variant.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::Netlify { .. } => ProviderType::Netlify,
        }
    }
}
