//! Set difference between a desired and an observed record collection.
//!
//! Records are matched by [`Slot`] (fully-qualified name + type). Inside a slot, records
//! with identical content cancel out; what is left is paired up as modifications, and the
//! excess on either side becomes a plain create or delete. Finally a leftover create and a
//! leftover delete at the same name but of different types are paired as a type change.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::types::{Record, RecordType, Slot};

/// Why two record collections could not be compared.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum DiffError {
    /// The same record appears twice in the desired set.
    #[error("duplicate record {content} at {slot}")]
    DuplicateRecord { slot: String, content: String },

    /// A record is missing a field the comparison relies on.
    #[error("malformed record {name}: {reason}")]
    MalformedRecord { name: String, reason: String },
}

/// What a single [`Change`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Delete,
    Modify,
}

/// One difference between desired and observed state.
///
/// `Create` carries only `desired`, `Delete` only `existing`, `Modify` both.
#[derive(Debug, Clone)]
pub struct Change {
    pub kind: ChangeKind,
    pub desired: Option<Record>,
    pub existing: Option<Record>,
}

impl Change {
    pub fn create(desired: Record) -> Self {
        Self {
            kind: ChangeKind::Create,
            desired: Some(desired),
            existing: None,
        }
    }

    pub fn delete(existing: Record) -> Self {
        Self {
            kind: ChangeKind::Delete,
            desired: None,
            existing: Some(existing),
        }
    }

    pub fn modify(existing: Record, desired: Record) -> Self {
        Self {
            kind: ChangeKind::Modify,
            desired: Some(desired),
            existing: Some(existing),
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.existing, &self.desired) {
            (Some(old), Some(new)) => write!(
                f,
                "MODIFY {}: ({} {} ttl={}) -> ({} {} ttl={})",
                new.name_fqdn,
                old.record_type,
                old.content(),
                old.ttl,
                new.record_type,
                new.content(),
                new.ttl
            ),
            (None, Some(new)) => write!(f, "CREATE {new}"),
            (Some(old), None) => write!(f, "DELETE {old}"),
            (None, None) => f.write_str("NOOP"),
        }
    }
}

/// Result of comparing two record collections.
#[derive(Debug, Clone, Default)]
pub struct Changeset {
    /// Desired records already present with identical content.
    pub unchanged: Vec<Record>,
    pub create: Vec<Change>,
    pub delete: Vec<Change>,
    pub modify: Vec<Change>,
}

impl Changeset {
    /// `true` when live state already matches desired state.
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.delete.is_empty() && self.modify.is_empty()
    }
}

/// The set-difference primitive the reconciler is built on.
pub trait Differ: Send + Sync {
    /// Compares `desired` against `existing`.
    ///
    /// Either returns the full changeset or an error, never a partial result.
    fn incremental_diff(
        &self,
        desired: &[Record],
        existing: &[Record],
    ) -> Result<Changeset, DiffError>;
}

/// Default [`Differ`]: multiset comparison per slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotDiffer;

impl Differ for SlotDiffer {
    fn incremental_diff(
        &self,
        desired: &[Record],
        existing: &[Record],
    ) -> Result<Changeset, DiffError> {
        for record in desired {
            check_desired(record)?;
        }
        for record in existing {
            check_existing(record)?;
        }

        let desired_slots = group_by_slot(desired);
        let existing_slots = group_by_slot(existing);
        check_duplicates(&desired_slots)?;

        let mut keys: Vec<&Slot> = desired_slots.keys().chain(existing_slots.keys()).collect();
        keys.sort();
        keys.dedup();

        let mut changeset = Changeset::default();
        let mut leftover_create = Vec::new();
        let mut leftover_delete = Vec::new();

        for slot in keys {
            let wanted = desired_slots.get(slot).cloned().unwrap_or_default();
            let mut have: Vec<Option<&Record>> = existing_slots
                .get(slot)
                .map(|v| v.iter().copied().map(Some).collect())
                .unwrap_or_default();

            let mut unmatched = Vec::new();
            for want in wanted {
                let hit = have
                    .iter_mut()
                    .find(|h| h.is_some_and(|h| h.same_content(want)));
                match hit {
                    Some(slot_entry) => {
                        *slot_entry = None;
                        changeset.unchanged.push(want.clone());
                    }
                    None => unmatched.push(want),
                }
            }

            let mut remaining: Vec<&Record> = have.into_iter().flatten().collect();
            unmatched.sort_by_key(|r| sort_key(r));
            remaining.sort_by_key(|r| sort_key(r));

            let mut unmatched = unmatched.into_iter();
            let mut remaining = remaining.into_iter();
            loop {
                match (remaining.next(), unmatched.next()) {
                    (Some(old), Some(new)) => changeset
                        .modify
                        .push(Change::modify(old.clone(), new.clone())),
                    (Some(old), None) => leftover_delete.push(old.clone()),
                    (None, Some(new)) => leftover_create.push(new.clone()),
                    (None, None) => break,
                }
            }
        }

        pair_type_changes(&mut changeset, leftover_create, leftover_delete);

        log::debug!(
            "Diff: {} unchanged, {} create, {} delete, {} modify",
            changeset.unchanged.len(),
            changeset.create.len(),
            changeset.delete.len(),
            changeset.modify.len()
        );

        Ok(changeset)
    }
}

/// A leftover create and a leftover delete at the same name become one modification, so
/// e.g. `A app` -> `CNAME app` is reported as a type change.
fn pair_type_changes(changeset: &mut Changeset, creates: Vec<Record>, deletes: Vec<Record>) {
    let mut deletes_by_name: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for old in deletes {
        deletes_by_name
            .entry(old.slot().fqdn)
            .or_default()
            .push(old);
    }
    for olds in deletes_by_name.values_mut() {
        // pop() takes from the back
        olds.reverse();
    }

    for new in creates {
        match deletes_by_name
            .get_mut(&new.slot().fqdn)
            .and_then(Vec::pop)
        {
            Some(old) => changeset.modify.push(Change::modify(old, new)),
            None => changeset.create.push(Change::create(new)),
        }
    }

    for old in deletes_by_name.into_values().flat_map(|mut v| {
        v.reverse();
        v
    }) {
        changeset.delete.push(Change::delete(old));
    }
}

fn group_by_slot(records: &[Record]) -> BTreeMap<Slot, Vec<&Record>> {
    let mut slots: BTreeMap<Slot, Vec<&Record>> = BTreeMap::new();
    for record in records {
        slots.entry(record.slot()).or_default().push(record);
    }
    slots
}

fn sort_key(record: &Record) -> (String, u32) {
    (record.content(), record.ttl)
}

fn check_desired(record: &Record) -> Result<(), DiffError> {
    if record.slot().fqdn.is_empty() {
        return Err(DiffError::MalformedRecord {
            name: record.to_string(),
            reason: "empty name".to_string(),
        });
    }
    if record.target.is_empty() && record.record_type != RecordType::Txt {
        return Err(DiffError::MalformedRecord {
            name: record.name_fqdn.clone(),
            reason: format!("{} record without target", record.record_type),
        });
    }
    Ok(())
}

fn check_existing(record: &Record) -> Result<(), DiffError> {
    if record.origin.is_none() {
        return Err(DiffError::MalformedRecord {
            name: record.name_fqdn.clone(),
            reason: "observed record carries no provider reference".to_string(),
        });
    }
    Ok(())
}

fn check_duplicates(desired: &BTreeMap<Slot, Vec<&Record>>) -> Result<(), DiffError> {
    for (slot, records) in desired {
        for (i, a) in records.iter().enumerate() {
            if records[i + 1..].iter().any(|b| a.same_content(b)) {
                return Err(DiffError::DuplicateRecord {
                    slot: slot.to_string(),
                    content: a.content(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{a_record, observed};

    fn diff(desired: &[Record], existing: &[Record]) -> Changeset {
        SlotDiffer.incremental_diff(desired, existing).unwrap()
    }

    #[test]
    fn identical_sets_are_empty() {
        let want = vec![a_record("www", "1.2.3.4")];
        let have = vec![observed(a_record("www", "1.2.3.4"), "r1")];
        let cs = diff(&want, &have);
        assert!(cs.is_empty());
        assert_eq!(cs.unchanged.len(), 1);
    }

    #[test]
    fn order_of_input_does_not_matter() {
        let want = vec![a_record("a", "1.1.1.1"), a_record("b", "2.2.2.2")];
        let have = vec![
            observed(a_record("b", "2.2.2.2"), "r2"),
            observed(a_record("a", "1.1.1.1"), "r1"),
        ];
        assert!(diff(&want, &have).is_empty());
    }

    #[test]
    fn create_and_delete() {
        let cs = diff(&[a_record("www", "1.2.3.4")], &[]);
        assert_eq!(cs.create.len(), 1);
        assert!(cs.delete.is_empty() && cs.modify.is_empty());

        let cs = diff(&[], &[observed(a_record("old", "5.6.7.8"), "r9")]);
        assert_eq!(cs.delete.len(), 1);
        assert_eq!(
            cs.delete[0].existing.as_ref().and_then(Record::origin_id),
            Some("r9")
        );
    }

    #[test]
    fn ttl_change_is_modify() {
        let cs = diff(
            &[a_record("www", "1.2.3.4").with_ttl(60)],
            &[observed(a_record("www", "1.2.3.4"), "r1")],
        );
        assert_eq!(cs.modify.len(), 1);
        assert_eq!(cs.modify[0].kind, ChangeKind::Modify);
    }

    #[test]
    fn round_robin_matches_distinct_records() {
        let want = vec![a_record("www", "1.1.1.1"), a_record("www", "2.2.2.2")];
        let have = vec![
            observed(a_record("www", "1.1.1.1"), "r1"),
            observed(a_record("www", "3.3.3.3"), "r3"),
            observed(a_record("www", "4.4.4.4"), "r4"),
        ];
        let cs = diff(&want, &have);
        assert_eq!(cs.unchanged.len(), 1);
        assert_eq!(cs.modify.len(), 1);
        assert_eq!(cs.delete.len(), 1);
        assert!(cs.create.is_empty());

        let modified = &cs.modify[0];
        assert_eq!(modified.existing.as_ref().unwrap().target, "3.3.3.3");
        assert_eq!(modified.desired.as_ref().unwrap().target, "2.2.2.2");
        assert_eq!(
            cs.delete[0].existing.as_ref().unwrap().target,
            "4.4.4.4"
        );
    }

    #[test]
    fn type_change_pairs_as_modify() {
        let want = vec![Record::new(
            "app",
            "example.com",
            RecordType::Cname,
            "host.example.com.",
        )];
        let have = vec![observed(a_record("app", "9.9.9.9"), "r1")];
        let cs = diff(&want, &have);
        assert!(cs.create.is_empty());
        assert!(cs.delete.is_empty());
        assert_eq!(cs.modify.len(), 1);
        assert_eq!(
            cs.modify[0].to_string(),
            "MODIFY app.example.com: (A 9.9.9.9 ttl=3600) -> (CNAME host.example.com. ttl=3600)"
        );
    }

    #[test]
    fn duplicate_desired_record_is_an_error() {
        let want = vec![a_record("www", "1.2.3.4"), a_record("www", "1.2.3.4")];
        let err = SlotDiffer.incremental_diff(&want, &[]).unwrap_err();
        assert!(matches!(err, DiffError::DuplicateRecord { .. }));
    }

    #[test]
    fn observed_record_without_origin_is_malformed() {
        let err = SlotDiffer
            .incremental_diff(&[], &[a_record("www", "1.2.3.4")])
            .unwrap_err();
        assert!(matches!(err, DiffError::MalformedRecord { .. }));
    }

    #[test]
    fn desired_record_without_target_is_malformed() {
        let err = SlotDiffer
            .incremental_diff(&[a_record("www", "")], &[])
            .unwrap_err();
        assert!(matches!(err, DiffError::MalformedRecord { .. }));

        // empty TXT is legal
        assert!(
            SlotDiffer
                .incremental_diff(&[Record::txt("@", "example.com", "")], &[])
                .is_ok()
        );
    }

    #[test]
    fn change_display() {
        let cs = diff(&[a_record("www", "1.2.3.4").with_ttl(300)], &[]);
        assert_eq!(
            cs.create[0].to_string(),
            "CREATE A www.example.com 1.2.3.4 ttl=300"
        );
    }
}
