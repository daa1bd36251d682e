//! Membership request workflow and member administration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use congregate_auth::OrgRole;
use congregate_core::{DomainError, DomainResult, MembershipRequestId, OrgId, UserId};
use congregate_gating::{Membership, MembershipDirectory, Organization};

use crate::activity::{ActivityEntry, ActivityLog, record};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipRequestStatus {
    Pending,
    Approved,
    Declined,
}

impl MembershipRequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MembershipRequestStatus::Pending)
    }
}

/// A request to join an organization. Immutable once terminal; at most one
/// `pending` row per (org, user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRequest {
    pub id: MembershipRequestId,
    pub org_id: OrgId,
    pub user_id: UserId,
    pub status: MembershipRequestStatus,
    pub notes: Option<String>,
    pub requested_at: DateTime<Utc>,
    pub decided_by: Option<UserId>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl MembershipRequest {
    pub fn new(org_id: OrgId, user_id: UserId, notes: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: MembershipRequestId::new(),
            org_id,
            user_id,
            status: MembershipRequestStatus::Pending,
            notes,
            requested_at: now,
            decided_by: None,
            decided_at: None,
        }
    }
}

/// Persistence seam for membership requests.
///
/// `insert` must enforce at-most-one-pending per (org, user) atomically (the
/// analogue of a partial unique index) and report violations as `Conflict`.
/// `transition` is a compare-and-set: it succeeds only if the row is still
/// `pending`, so exactly one concurrent reviewer claims a request.
pub trait MembershipRequestStore: Send + Sync {
    fn insert(&self, request: MembershipRequest) -> DomainResult<()>;
    fn get(&self, org_id: OrgId, id: MembershipRequestId) -> DomainResult<Option<MembershipRequest>>;
    fn list_pending(&self, org_id: OrgId) -> DomainResult<Vec<MembershipRequest>>;
    fn transition(
        &self,
        org_id: OrgId,
        id: MembershipRequestId,
        to: MembershipRequestStatus,
        decided_by: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<MembershipRequest>;
}

impl<S> MembershipRequestStore for Arc<S>
where
    S: MembershipRequestStore + ?Sized,
{
    fn insert(&self, request: MembershipRequest) -> DomainResult<()> {
        (**self).insert(request)
    }

    fn get(&self, org_id: OrgId, id: MembershipRequestId) -> DomainResult<Option<MembershipRequest>> {
        (**self).get(org_id, id)
    }

    fn list_pending(&self, org_id: OrgId) -> DomainResult<Vec<MembershipRequest>> {
        (**self).list_pending(org_id)
    }

    fn transition(
        &self,
        org_id: OrgId,
        id: MembershipRequestId,
        to: MembershipRequestStatus,
        decided_by: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<MembershipRequest> {
        (**self).transition(org_id, id, to, decided_by, at)
    }
}

/// Membership request lifecycle plus member administration.
pub struct MembershipWorkflow {
    requests: Arc<dyn MembershipRequestStore>,
    members: Arc<dyn MembershipDirectory>,
    activity: Arc<dyn ActivityLog>,
}

impl MembershipWorkflow {
    pub fn new(
        requests: Arc<dyn MembershipRequestStore>,
        members: Arc<dyn MembershipDirectory>,
        activity: Arc<dyn ActivityLog>,
    ) -> Self {
        Self {
            requests,
            members,
            activity,
        }
    }

    /// Submit a membership request on behalf of `user_id`.
    ///
    /// Members and above cannot request; a second pending request is a
    /// `Conflict` surfaced by the store's uniqueness constraint.
    /// Re-requesting after a decline is allowed (a fresh row).
    pub fn submit(
        &self,
        org: &Organization,
        user_id: UserId,
        viewer_role: OrgRole,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<MembershipRequest> {
        if viewer_role.is_member() {
            return Err(DomainError::conflict("already a member of this organization"));
        }

        let request = MembershipRequest::new(org.id, user_id, notes, now);
        self.requests.insert(request.clone())?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(
                org.id,
                user_id,
                "membership_request.submitted",
                "membership_request",
                request.id,
                now,
            ),
        );
        Ok(request)
    }

    pub fn pending(&self, org_id: OrgId) -> DomainResult<Vec<MembershipRequest>> {
        self.requests.list_pending(org_id)
    }

    /// Approve a pending request: claim it via compare-and-set, then create
    /// (or promote) the membership row. The upsert is idempotent, so a retry
    /// after a crash between the two steps converges.
    pub fn approve(
        &self,
        org_id: OrgId,
        id: MembershipRequestId,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<MembershipRequest> {
        let request =
            self.requests
                .transition(org_id, id, MembershipRequestStatus::Approved, actor, now)?;

        // Promote only if the existing affiliation is weaker than member.
        let existing = self.members.membership(org_id, request.user_id)?;
        if existing.map(|m| m.role < OrgRole::Member).unwrap_or(true) {
            self.members.upsert_membership(Membership {
                org_id,
                user_id: request.user_id,
                role: OrgRole::Member,
                since: now,
            })?;
        }

        record(
            self.activity.as_ref(),
            ActivityEntry::new(
                org_id,
                actor,
                "membership_request.approved",
                "membership_request",
                request.id,
                now,
            )
            .with_metadata(serde_json::json!({ "user_id": request.user_id })),
        );
        Ok(request)
    }

    /// Decline a pending request: status change and audit entry only.
    pub fn decline(
        &self,
        org_id: OrgId,
        id: MembershipRequestId,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<MembershipRequest> {
        let request =
            self.requests
                .transition(org_id, id, MembershipRequestStatus::Declined, actor, now)?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(
                org_id,
                actor,
                "membership_request.declined",
                "membership_request",
                request.id,
                now,
            ),
        );
        Ok(request)
    }

    pub fn members(&self, org_id: OrgId) -> DomainResult<Vec<Membership>> {
        self.members.list_memberships(org_id)
    }

    /// Change a member's role. Only an owner may change another owner's
    /// role; roles below `member` are not storable.
    pub fn change_role(
        &self,
        org_id: OrgId,
        target: UserId,
        new_role: OrgRole,
        actor: UserId,
        actor_role: OrgRole,
        now: DateTime<Utc>,
    ) -> DomainResult<Membership> {
        if new_role < OrgRole::Member {
            return Err(DomainError::validation("role must be member or above"));
        }

        let current = self
            .members
            .membership(org_id, target)?
            .ok_or(DomainError::NotFound)?;

        if current.role == OrgRole::Owner && actor_role != OrgRole::Owner {
            return Err(DomainError::validation(
                "only an owner may change another owner's role",
            ));
        }

        let updated = Membership {
            role: new_role,
            ..current
        };
        self.members.upsert_membership(updated.clone())?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(org_id, actor, "member.role_changed", "membership", target, now)
                .with_metadata(serde_json::json!({ "role": new_role })),
        );
        Ok(updated)
    }

    /// Remove a member. An owner's membership cannot be removed.
    pub fn remove_member(
        &self,
        org_id: OrgId,
        target: UserId,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let current = self
            .members
            .membership(org_id, target)?
            .ok_or(DomainError::NotFound)?;

        if current.role == OrgRole::Owner {
            return Err(DomainError::validation("an owner's membership cannot be removed"));
        }

        self.members.remove_membership(org_id, target)?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(org_id, actor, "member.removed", "membership", target, now),
        );
        Ok(())
    }
}
