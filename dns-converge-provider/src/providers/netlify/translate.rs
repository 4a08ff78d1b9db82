//! Conversion between Netlify records and [`Record`].

use crate::error::{SyncError, SyncResult};
use crate::providers::common::parse_record_type;
use crate::txt::{decode_chunks, encode_chunks};
use crate::types::{DEFAULT_TTL, OriginRef, Record, RecordType};
use crate::utils::names::{full_name_to_relative, normalize_domain_name};

use super::{NetlifyDnsRecord, NetlifyRecordCreate, PROVIDER_NAME};

/// Makes a name-valued target absolute.
///
/// Netlify may answer `"@"` for the zone apex; `"."` is the root and stays as is.
pub fn qualify_target(target: &str, zone: &str) -> String {
    match target {
        "@" => format!("{}.", normalize_domain_name(zone)),
        "." => ".".to_string(),
        t if t.ends_with('.') => t.to_string(),
        t => format!("{t}."),
    }
}

/// Converts a record read from Netlify into a [`Record`] of `zone`.
///
/// Records Netlify does not let the API manage are rejected with
/// [`SyncError::UnmanagedRecord`].
pub fn record_from_native(zone: &str, native: &NetlifyDnsRecord) -> SyncResult<Record> {
    if !native.managed {
        return Err(SyncError::UnmanagedRecord {
            provider: PROVIDER_NAME.to_string(),
            hostname: native.hostname.clone(),
            zone: zone.to_string(),
        });
    }

    let record_type = parse_record_type(&native.record_type, PROVIDER_NAME)?;
    let label = full_name_to_relative(&native.hostname, zone);
    let target = if record_type.is_relational() {
        qualify_target(&native.value, zone)
    } else {
        native.value.clone()
    };

    let mut record = Record::new(&label, zone, record_type, target)
        .with_ttl(native.ttl.unwrap_or(DEFAULT_TTL))
        .with_origin(OriginRef {
            record_id: native.id.clone(),
            zone_id: native.dns_zone_id.clone(),
        });
    record.name_fqdn = normalize_domain_name(&native.hostname).to_lowercase();

    let priority = native.priority.unwrap_or_default();
    record.mx_preference = priority;
    record.srv_priority = priority;
    record.srv_weight = native.weight.unwrap_or_default();
    record.srv_port = native.port.unwrap_or_default();
    record.caa_flag = native.flag.unwrap_or_default();
    record.caa_tag = native.tag.clone().unwrap_or_default();
    if record_type == RecordType::Txt {
        record.set_txt_strings(decode_chunks(&native.value));
    }

    Ok(record)
}

/// Builds the create request for a desired record of `zone`.
///
/// Name-valued targets are sent without their trailing dot; TXT chunks are joined as
/// described in [`encode_chunks`].
pub fn record_to_create(zone: &str, record: &Record) -> NetlifyRecordCreate {
    let hostname = if record.name_fqdn.is_empty() {
        normalize_domain_name(zone)
    } else {
        normalize_domain_name(&record.name_fqdn)
    };

    let value = match record.record_type {
        RecordType::Txt if record.txt_strings.is_empty() => {
            encode_chunks(std::slice::from_ref(&record.target))
        }
        RecordType::Txt => encode_chunks(&record.txt_strings),
        t if t.is_relational() && record.target != "." => {
            normalize_domain_name(&record.target)
        }
        _ => record.target.clone(),
    };

    // unused numeric fields go out as zero
    let mut request = NetlifyRecordCreate {
        record_type: record.record_type.as_str().to_string(),
        hostname,
        value,
        ttl: record.ttl,
        priority: Some(0),
        weight: Some(0),
        port: Some(0),
        flag: Some(0),
        tag: None,
    };

    match record.record_type {
        RecordType::Mx => request.priority = Some(record.mx_preference),
        RecordType::Srv => {
            request.priority = Some(record.srv_priority);
            request.weight = Some(record.srv_weight);
            request.port = Some(record.srv_port);
        }
        RecordType::Caa => {
            request.flag = Some(record.caa_flag);
            request.tag = Some(record.caa_tag.clone());
        }
        _ => {}
    }

    request
}
