//! Test helpers
//!
//! Record builders and an in-memory Netlify account.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::providers::netlify::{NetlifyDnsRecord, NetlifyRecordCreate, NetlifyZone, ZoneApi};
use crate::types::{OriginRef, Record, RecordType};

pub const TEST_ZONE: &str = "example.com";

/// Desired A record `label` in [`TEST_ZONE`].
pub fn a_record(label: &str, target: &str) -> Record {
    Record::new(label, TEST_ZONE, RecordType::A, target)
}

/// Marks `record` as read from the provider under `id`.
pub fn observed(record: Record, id: &str) -> Record {
    record.with_origin(OriginRef {
        record_id: id.to_string(),
        zone_id: "z1".to_string(),
    })
}

// ===== MockZoneApi =====

pub struct MockZoneApi {
    zones: RwLock<Vec<NetlifyZone>>,
    records: RwLock<HashMap<String, Vec<NetlifyDnsRecord>>>,
    /// One entry per API call, e.g. `"delete z1/r3"`
    calls: RwLock<Vec<String>>,
    /// If set, the next call fails with this error
    next_error: RwLock<Option<ProviderError>>,
    next_id: AtomicUsize,
}

impl MockZoneApi {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(Vec::new()),
            records: RwLock::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
            next_error: RwLock::new(None),
            next_id: AtomicUsize::new(1),
        }
    }

    pub async fn add_zone(&self, id: &str, name: &str) {
        self.zones.write().await.push(NetlifyZone {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.records.write().await.entry(id.to_string()).or_default();
    }

    /// Stores a managed record and returns its ID.
    pub async fn add_native(
        &self,
        zone_id: &str,
        hostname: &str,
        record_type: &str,
        value: &str,
    ) -> String {
        self.insert(zone_id, hostname, record_type, value, true).await
    }

    pub async fn add_unmanaged(
        &self,
        zone_id: &str,
        hostname: &str,
        record_type: &str,
        value: &str,
    ) -> String {
        self.insert(zone_id, hostname, record_type, value, false)
            .await
    }

    pub async fn records(&self, zone_id: &str) -> Vec<NetlifyDnsRecord> {
        self.records
            .read()
            .await
            .get(zone_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn fail_next(&self, error: ProviderError) {
        *self.next_error.write().await = Some(error);
    }

    async fn insert(
        &self,
        zone_id: &str,
        hostname: &str,
        record_type: &str,
        value: &str,
        managed: bool,
    ) -> String {
        let id = self.new_id();
        self.records
            .write()
            .await
            .entry(zone_id.to_string())
            .or_default()
            .push(NetlifyDnsRecord {
                id: id.clone(),
                hostname: hostname.to_string(),
                record_type: record_type.to_string(),
                value: value.to_string(),
                ttl: Some(3600),
                priority: None,
                weight: None,
                port: None,
                flag: None,
                tag: None,
                managed,
                dns_zone_id: zone_id.to_string(),
                site_id: None,
            });
        id
    }

    fn new_id(&self) -> String {
        format!("r{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn record_call(&self, call: String) -> Result<()> {
        self.calls.write().await.push(call);
        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ZoneApi for MockZoneApi {
    async fn list_zones(&self) -> Result<Vec<NetlifyZone>> {
        self.record_call("list_zones".to_string()).await?;
        Ok(self.zones.read().await.clone())
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<NetlifyDnsRecord>> {
        self.record_call(format!("list_records {zone_id}")).await?;
        self.records
            .read()
            .await
            .get(zone_id)
            .cloned()
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: "netlify".to_string(),
                domain: zone_id.to_string(),
                raw_message: None,
            })
    }

    async fn create_record(
        &self,
        zone_id: &str,
        record: &NetlifyRecordCreate,
    ) -> Result<NetlifyDnsRecord> {
        self.record_call(format!(
            "create {zone_id} {} {}",
            record.record_type, record.hostname
        ))
        .await?;

        let mut records = self.records.write().await;
        let Some(zone) = records.get_mut(zone_id) else {
            return Err(ProviderError::DomainNotFound {
                provider: "netlify".to_string(),
                domain: zone_id.to_string(),
                raw_message: None,
            });
        };
        let stored = NetlifyDnsRecord {
            id: self.new_id(),
            hostname: record.hostname.clone(),
            record_type: record.record_type.clone(),
            value: record.value.clone(),
            ttl: Some(record.ttl),
            priority: record.priority,
            weight: record.weight,
            port: record.port,
            flag: record.flag,
            tag: record.tag.clone(),
            managed: true,
            dns_zone_id: zone_id.to_string(),
            site_id: None,
        };
        zone.push(stored.clone());
        Ok(stored)
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.record_call(format!("delete {zone_id}/{record_id}"))
            .await?;

        let mut records = self.records.write().await;
        let index = records
            .get(zone_id)
            .and_then(|z| z.iter().position(|r| r.id == record_id));
        match (records.get_mut(zone_id), index) {
            (Some(zone), Some(index)) => {
                zone.remove(index);
                Ok(())
            }
            _ => Err(ProviderError::RecordNotFound {
                provider: "netlify".to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            }),
        }
    }
}
