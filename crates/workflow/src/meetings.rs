//! Pastoral meeting (appointment) requests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use congregate_core::{DomainError, DomainResult, MeetingRequestId, OrgId, UserId};
use congregate_entitlements::{EntitlementStore, features};
use congregate_gating::Organization;

use crate::activity::{ActivityEntry, ActivityLog, record};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    New,
    InProgress,
    Closed,
}

impl MeetingStatus {
    /// The lifecycle is strictly forward with a single terminal state; no
    /// reopening is defined.
    pub fn next(self) -> Option<MeetingStatus> {
        match self {
            MeetingStatus::New => Some(MeetingStatus::InProgress),
            MeetingStatus::InProgress => Some(MeetingStatus::Closed),
            MeetingStatus::Closed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRequest {
    pub id: MeetingRequestId,
    pub org_id: OrgId,
    pub requester_id: UserId,
    pub topic: Option<String>,
    pub status: MeetingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_by: Option<UserId>,
}

pub trait MeetingRequestStore: Send + Sync {
    fn insert(&self, request: MeetingRequest) -> DomainResult<()>;
    fn get(&self, org_id: OrgId, id: MeetingRequestId) -> DomainResult<Option<MeetingRequest>>;
    fn list(&self, org_id: OrgId) -> DomainResult<Vec<MeetingRequest>>;
    fn update(&self, request: MeetingRequest) -> DomainResult<()>;
}

impl<S> MeetingRequestStore for Arc<S>
where
    S: MeetingRequestStore + ?Sized,
{
    fn insert(&self, request: MeetingRequest) -> DomainResult<()> {
        (**self).insert(request)
    }

    fn get(&self, org_id: OrgId, id: MeetingRequestId) -> DomainResult<Option<MeetingRequest>> {
        (**self).get(org_id, id)
    }

    fn list(&self, org_id: OrgId) -> DomainResult<Vec<MeetingRequest>> {
        (**self).list(org_id)
    }

    fn update(&self, request: MeetingRequest) -> DomainResult<()> {
        (**self).update(request)
    }
}

pub struct MeetingWorkflow {
    store: Arc<dyn MeetingRequestStore>,
    entitlements: Arc<EntitlementStore>,
    activity: Arc<dyn ActivityLog>,
}

impl MeetingWorkflow {
    pub fn new(
        store: Arc<dyn MeetingRequestStore>,
        entitlements: Arc<EntitlementStore>,
        activity: Arc<dyn ActivityLog>,
    ) -> Self {
        Self {
            store,
            entitlements,
            activity,
        }
    }

    /// The explicit feature-flag fall-through: when the org lacks
    /// `org.pastoral.appointmentRequests`, this entire workflow behaves as
    /// if it does not exist (`NotFound`), never as a disabled-feature error.
    pub fn ensure_enabled(&self, org_id: OrgId) -> DomainResult<()> {
        if self
            .entitlements
            .has_feature(org_id, &features::ORG_PASTORAL_APPOINTMENTS)?
        {
            Ok(())
        } else {
            Err(DomainError::NotFound)
        }
    }

    pub fn create(
        &self,
        org: &Organization,
        requester: UserId,
        topic: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<MeetingRequest> {
        self.ensure_enabled(org.id)?;

        let request = MeetingRequest {
            id: MeetingRequestId::new(),
            org_id: org.id,
            requester_id: requester,
            topic,
            status: MeetingStatus::New,
            created_at: now,
            updated_at: now,
            closed_by: None,
        };
        self.store.insert(request.clone())?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(
                org.id,
                requester,
                "meeting_request.created",
                "meeting_request",
                request.id,
                now,
            ),
        );
        Ok(request)
    }

    /// Advance one step forward. Closing records who closed it.
    pub fn advance(
        &self,
        org_id: OrgId,
        id: MeetingRequestId,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<MeetingRequest> {
        self.ensure_enabled(org_id)?;

        let mut request = self.store.get(org_id, id)?.ok_or(DomainError::NotFound)?;
        let next = request.status.next().ok_or_else(|| {
            DomainError::invalid_state("meeting request is already closed")
        })?;

        request.status = next;
        request.updated_at = now;
        if next == MeetingStatus::Closed {
            request.closed_by = Some(actor);
        }
        self.store.update(request.clone())?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(org_id, actor, "meeting_request.advanced", "meeting_request", id, now)
                .with_metadata(serde_json::json!({ "status": next })),
        );
        Ok(request)
    }

    pub fn list(&self, org_id: OrgId) -> DomainResult<Vec<MeetingRequest>> {
        self.ensure_enabled(org_id)?;
        self.store.list(org_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_is_strictly_forward() {
        assert_eq!(MeetingStatus::New.next(), Some(MeetingStatus::InProgress));
        assert_eq!(MeetingStatus::InProgress.next(), Some(MeetingStatus::Closed));
        assert_eq!(MeetingStatus::Closed.next(), None);
    }
}
