//! Netlify `DnsServiceProvider` trait implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::correction::Correction;
use crate::diff::DiffError;
use crate::error::{ProviderError, SyncError, SyncResult};
use crate::reconcile::{PlannedAction, prepare_desired, reconcile};
use crate::traits::DnsServiceProvider;
use crate::types::{
    DomainConfig, FieldType, Nameserver, ProviderCredentialField, ProviderFeatures,
    ProviderMetadata, ProviderType, Record,
};

use super::{
    DEFAULT_NAMESERVERS, NetlifyDnsRecord, NetlifyProvider, NetlifyZone, PROVIDER_NAME,
    record_from_native, record_to_create,
};

impl NetlifyProvider {
    /// Capability table of Netlify DNS.
    pub fn features() -> ProviderFeatures {
        ProviderFeatures {
            can_use_alias: false,
            can_use_caa: true,
            can_use_naptr: false,
            can_use_ds: false,
            can_use_ptr: false,
            can_use_sshfp: true,
            can_use_srv: true,
            can_use_tlsa: false,
            can_auto_dnssec: false,
            can_create_domains: false,
            can_dual_host: false,
            can_get_zones: true,
            officially_supported: true,
        }
    }

    /// All zones of the account named exactly `zone`.
    async fn matching_zones(&self, zone: &str) -> SyncResult<Vec<NetlifyZone>> {
        let zones = self.api.list_zones().await?;
        Ok(zones.into_iter().filter(|z| z.name == zone).collect())
    }

    /// Native records of every zone in `zones`, in the order the API returned them.
    async fn native_records(&self, zones: &[NetlifyZone]) -> SyncResult<Vec<NetlifyDnsRecord>> {
        let mut records = Vec::new();
        for zone in zones {
            let mut batch = self.api.list_records(&zone.id).await?;
            for record in &mut batch {
                if record.dns_zone_id.is_empty() {
                    record.dns_zone_id.clone_from(&zone.id);
                }
            }
            records.extend(batch);
        }
        Ok(records)
    }

    fn translate_all(zone: &str, natives: &[NetlifyDnsRecord]) -> SyncResult<Vec<Record>> {
        natives
            .iter()
            .map(|native| record_from_native(zone, native))
            .collect()
    }

    /// Turns one planned step into a deferred API call.
    fn bind(&self, zone: &str, zone_id: &str, action: PlannedAction) -> SyncResult<Correction> {
        let api = Arc::clone(&self.api);
        match action {
            PlannedAction::Delete { existing, msg } => {
                let origin = existing.origin.ok_or_else(|| DiffError::MalformedRecord {
                    name: existing.name_fqdn.clone(),
                    reason: "observed record carries no provider reference".to_string(),
                })?;
                let msg = format!("{msg}, Netlify record ID: {}", origin.record_id);
                Ok(Correction::new(msg, move || async move {
                    api.delete_record(&origin.zone_id, &origin.record_id).await
                }))
            }
            PlannedAction::Create { desired, msg } => {
                let request = record_to_create(zone, &desired);
                let zone_id = zone_id.to_string();
                Ok(Correction::new(msg, move || async move {
                    api.create_record(&zone_id, &request).await.map(|_| ())
                }))
            }
        }
    }
}

#[async_trait]
impl DnsServiceProvider for NetlifyProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Netlify,
            registered_name: "NETLIFY".to_string(),
            name: "Netlify".to_string(),
            description: "Netlify DNS".to_string(),
            required_fields: vec![
                ProviderCredentialField {
                    key: "token".to_string(),
                    label: "Personal Access Token".to_string(),
                    field_type: FieldType::Password,
                    required: true,
                    help_text: Some(
                        "Create one under User settings > Applications > Personal access tokens"
                            .to_string(),
                    ),
                },
                ProviderCredentialField {
                    key: "api_base".to_string(),
                    label: "API endpoint".to_string(),
                    field_type: FieldType::Text,
                    required: false,
                    help_text: Some(format!("Defaults to {}", super::NETLIFY_API_BASE)),
                },
            ],
            features: Self::features(),
        }
    }

    async fn get_nameservers(&self, _zone: &str) -> SyncResult<Vec<Nameserver>> {
        Ok(Nameserver::from_names(&DEFAULT_NAMESERVERS))
    }

    async fn get_zone_records(&self, zone: &str) -> SyncResult<Vec<Record>> {
        let zones = self.matching_zones(zone).await?;
        if zones.is_empty() {
            log::debug!("[{PROVIDER_NAME}] Zone {zone} not found, no records");
            return Ok(Vec::new());
        }
        let natives = self.native_records(&zones).await?;
        Self::translate_all(zone, &natives)
    }

    async fn get_domain_corrections(&self, mut dc: DomainConfig) -> SyncResult<Vec<Correction>> {
        prepare_desired(&mut dc);

        let features = Self::features();
        if let Some(record) = dc.records.iter().find(|r| !features.supports(r.record_type)) {
            return Err(SyncError::Transport(ProviderError::UnsupportedRecordType {
                provider: PROVIDER_NAME.to_string(),
                record_type: record.record_type.to_string(),
            }));
        }

        let zones = self.matching_zones(&dc.name).await?;
        let Some(target_zone) = zones.first().cloned() else {
            if dc.records.is_empty() {
                return Ok(Vec::new());
            }
            return Err(SyncError::Transport(ProviderError::DomainNotFound {
                provider: PROVIDER_NAME.to_string(),
                domain: dc.name.clone(),
                raw_message: None,
            }));
        };

        let natives = self.native_records(&zones).await?;
        let existing = Self::translate_all(&dc.name, &natives)?;

        let actions = reconcile(self.differ.as_ref(), &dc.records, &existing)?;
        let deletes = actions.iter().filter(|a| a.is_delete()).count();
        if actions.is_empty() {
            log::debug!("[{PROVIDER_NAME}] {} is up to date", dc.name);
        } else {
            log::info!(
                "[{PROVIDER_NAME}] {}: {} corrections ({} deletes, {} creates)",
                dc.name,
                actions.len(),
                deletes,
                actions.len() - deletes
            );
        }

        actions
            .into_iter()
            .map(|action| self.bind(&dc.name, &target_zone.id, action))
            .collect()
    }
}
