//! Turns a [`Changeset`] into an ordered list of provider-neutral actions.
//!
//! The provider has no update endpoint, so a modification is a delete followed by a
//! create. Every delete is emitted before every create: a record can then change type at
//! the same name (CNAME -> A) without both versions existing at once.

use crate::diff::{Change, Changeset, DiffError, Differ};
use crate::txt::split_long_txt;
use crate::types::{DomainConfig, Record};

/// One step of a reconciliation plan.
#[derive(Debug, Clone)]
pub enum PlannedAction {
    /// Remove an observed record.
    Delete { existing: Record, msg: String },
    /// Add a desired record.
    Create { desired: Record, msg: String },
}

impl PlannedAction {
    /// Human-readable description of the step.
    pub fn msg(&self) -> &str {
        match self {
            Self::Delete { msg, .. } | Self::Create { msg, .. } => msg,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }

    /// The record the step acts on.
    pub fn record(&self) -> &Record {
        match self {
            Self::Delete { existing, .. } => existing,
            Self::Create { desired, .. } => desired,
        }
    }
}

/// Brings a desired zone into the shape the differ expects: normalized names and TXT
/// values split into legal chunks.
pub fn prepare_desired(dc: &mut DomainConfig) {
    dc.normalize();
    split_long_txt(&mut dc.records);
}

/// Orders the changes of `changeset`: all deletes (plain deletes, then the delete half of
/// each modification), then all creates (plain creates, then the create half of each
/// modification).
pub fn plan(changeset: &Changeset) -> Vec<PlannedAction> {
    let mut deletes = Vec::new();
    let mut creates = Vec::new();

    for change in &changeset.delete {
        if let Some(existing) = &change.existing {
            deletes.push(delete_action(existing, change));
        }
    }
    for change in &changeset.create {
        if let Some(desired) = &change.desired {
            creates.push(create_action(desired, change));
        }
    }
    for change in &changeset.modify {
        if let (Some(existing), Some(desired)) = (&change.existing, &change.desired) {
            deletes.push(delete_action(existing, change));
            creates.push(create_action(desired, change));
        }
    }

    deletes.extend(creates);
    deletes
}

/// Diffs `desired` against `existing` and plans the result.
///
/// `desired` must already have gone through [`prepare_desired`]. On a diff error nothing
/// is planned.
pub fn reconcile(
    differ: &dyn Differ,
    desired: &[Record],
    existing: &[Record],
) -> Result<Vec<PlannedAction>, DiffError> {
    let changeset = differ.incremental_diff(desired, existing)?;
    Ok(plan(&changeset))
}

fn delete_action(existing: &Record, change: &Change) -> PlannedAction {
    PlannedAction::Delete {
        existing: existing.clone(),
        msg: change.to_string(),
    }
}

fn create_action(desired: &Record, change: &Change) -> PlannedAction {
    PlannedAction::Create {
        desired: desired.clone(),
        msg: change.to_string(),
    }
}
