//! Append-only audit trail.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use congregate_core::{ActivityEntryId, DomainResult, OrgId, UserId};

/// One audit record. Written by every mutating operation in this subsystem;
/// never mutated or deleted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub id: ActivityEntryId,
    pub org_id: OrgId,
    pub actor_id: UserId,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    pub metadata: Value,
    pub at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(
        org_id: OrgId,
        actor_id: UserId,
        action: impl Into<String>,
        target_type: impl Into<String>,
        target_id: impl ToString,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityEntryId::new(),
            org_id,
            actor_id,
            action: action.into(),
            target_type: target_type.into(),
            target_id: target_id.to_string(),
            metadata: Value::Null,
            at,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Append-only sink for audit records.
pub trait ActivityLog: Send + Sync {
    fn append(&self, entry: ActivityEntry) -> DomainResult<()>;
    fn list(&self, org_id: OrgId) -> DomainResult<Vec<ActivityEntry>>;
}

impl<S> ActivityLog for Arc<S>
where
    S: ActivityLog + ?Sized,
{
    fn append(&self, entry: ActivityEntry) -> DomainResult<()> {
        (**self).append(entry)
    }

    fn list(&self, org_id: OrgId) -> DomainResult<Vec<ActivityEntry>> {
        (**self).list(org_id)
    }
}

/// Fire-and-log append: a failed audit write is surfaced to observability
/// but does not abort the primary transition.
pub fn record(log: &dyn ActivityLog, entry: ActivityEntry) {
    let action = entry.action.clone();
    if let Err(e) = log.append(entry) {
        tracing::warn!(action = %action, error = %e, "activity log append failed");
    }
}
