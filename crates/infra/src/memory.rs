//! In-memory store implementations (dev/test wiring).
//!
//! Compound operations take a single write guard so the constraints the
//! workflow engine relies on hold under concurrency: pending-request
//! uniqueness, compare-and-set transitions, and transactional
//! count-and-insert for program limits.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use congregate_core::{
    ApplicationId, DomainError, DomainResult, MeetingRequestId, MembershipRequestId, OrgId,
    ProgramId, UserId,
};
use congregate_entitlements::{TierRef, TierSource};
use congregate_gating::{
    Membership, MembershipDirectory, Organization, OrganizationDirectory, PendingRequestSource,
};
use congregate_projection::{Leader, OrgEvent, Post, Sermon};
use congregate_workflow::{
    ActivityEntry, ActivityLog, MeetingRequest, MeetingRequestStore, MembershipRequest,
    MembershipRequestStatus, MembershipRequestStore, OrdinationApplication, OrdinationProgram,
    OrdinationReview, OrdinationStore,
};

fn poisoned() -> DomainError {
    DomainError::storage("store lock poisoned")
}

/// Organizations, memberships, and tier assignments.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    orgs: RwLock<HashMap<OrgId, Organization>>,
    members: RwLock<HashMap<(OrgId, UserId), Membership>>,
    tiers: RwLock<HashMap<OrgId, TierRef>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an organization together with its tier assignment.
    pub fn insert_organization(&self, org: Organization) -> DomainResult<()> {
        let tier = org.tier.clone();
        self.tiers
            .write()
            .map_err(|_| poisoned())?
            .insert(org.id, tier);
        self.orgs
            .write()
            .map_err(|_| poisoned())?
            .insert(org.id, org);
        Ok(())
    }

    pub fn mark_deleted(&self, org_id: OrgId, at: DateTime<Utc>) -> DomainResult<()> {
        let mut orgs = self.orgs.write().map_err(|_| poisoned())?;
        let org = orgs.get_mut(&org_id).ok_or(DomainError::NotFound)?;
        org.deleted_at = Some(at);
        Ok(())
    }
}

impl OrganizationDirectory for InMemoryDirectory {
    fn organization(&self, id: OrgId) -> DomainResult<Option<Organization>> {
        Ok(self.orgs.read().map_err(|_| poisoned())?.get(&id).cloned())
    }

    fn organization_by_slug(&self, slug: &str) -> DomainResult<Option<Organization>> {
        Ok(self
            .orgs
            .read()
            .map_err(|_| poisoned())?
            .values()
            .find(|o| o.slug == slug)
            .cloned())
    }
}

impl MembershipDirectory for InMemoryDirectory {
    fn membership(&self, org_id: OrgId, user_id: UserId) -> DomainResult<Option<Membership>> {
        Ok(self
            .members
            .read()
            .map_err(|_| poisoned())?
            .get(&(org_id, user_id))
            .cloned())
    }

    fn list_memberships(&self, org_id: OrgId) -> DomainResult<Vec<Membership>> {
        let mut rows: Vec<Membership> = self
            .members
            .read()
            .map_err(|_| poisoned())?
            .values()
            .filter(|m| m.org_id == org_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.since);
        Ok(rows)
    }

    fn upsert_membership(&self, membership: Membership) -> DomainResult<()> {
        self.members
            .write()
            .map_err(|_| poisoned())?
            .insert((membership.org_id, membership.user_id), membership);
        Ok(())
    }

    fn remove_membership(&self, org_id: OrgId, user_id: UserId) -> DomainResult<()> {
        self.members
            .write()
            .map_err(|_| poisoned())?
            .remove(&(org_id, user_id))
            .map(|_| ())
            .ok_or(DomainError::NotFound)
    }
}

impl TierSource for InMemoryDirectory {
    fn tier_of(&self, org_id: OrgId) -> DomainResult<Option<TierRef>> {
        Ok(self.tiers.read().map_err(|_| poisoned())?.get(&org_id).cloned())
    }
}

/// Membership requests with the (org, user, pending) uniqueness constraint.
#[derive(Debug, Default)]
pub struct InMemoryMembershipRequests {
    rows: RwLock<Vec<MembershipRequest>>,
}

impl InMemoryMembershipRequests {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MembershipRequestStore for InMemoryMembershipRequests {
    fn insert(&self, request: MembershipRequest) -> DomainResult<()> {
        // Check and insert under one guard: the analogue of a partial
        // unique index on (org, user, status=pending).
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let duplicate = rows.iter().any(|r| {
            r.org_id == request.org_id
                && r.user_id == request.user_id
                && r.status == MembershipRequestStatus::Pending
        });
        if duplicate {
            return Err(DomainError::conflict("a membership request is already pending"));
        }
        rows.push(request);
        Ok(())
    }

    fn get(
        &self,
        org_id: OrgId,
        id: MembershipRequestId,
    ) -> DomainResult<Option<MembershipRequest>> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|r| r.org_id == org_id && r.id == id)
            .cloned())
    }

    fn list_pending(&self, org_id: OrgId) -> DomainResult<Vec<MembershipRequest>> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|r| r.org_id == org_id && r.status == MembershipRequestStatus::Pending)
            .cloned()
            .collect())
    }

    fn transition(
        &self,
        org_id: OrgId,
        id: MembershipRequestId,
        to: MembershipRequestStatus,
        decided_by: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<MembershipRequest> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let row = rows
            .iter_mut()
            .find(|r| r.org_id == org_id && r.id == id)
            .ok_or(DomainError::NotFound)?;

        // Compare-and-set: only a pending row may transition, so exactly one
        // concurrent decider wins.
        if row.status != MembershipRequestStatus::Pending {
            return Err(DomainError::invalid_state("membership request already decided"));
        }
        row.status = to;
        row.decided_by = Some(decided_by);
        row.decided_at = Some(at);
        Ok(row.clone())
    }
}

impl PendingRequestSource for InMemoryMembershipRequests {
    fn has_pending_request(&self, org_id: OrgId, user_id: UserId) -> DomainResult<bool> {
        Ok(self.rows.read().map_err(|_| poisoned())?.iter().any(|r| {
            r.org_id == org_id
                && r.user_id == user_id
                && r.status == MembershipRequestStatus::Pending
        }))
    }
}

/// Programs, applications, and reviews.
#[derive(Debug, Default)]
pub struct InMemoryOrdinationStore {
    programs: RwLock<Vec<OrdinationProgram>>,
    applications: RwLock<Vec<OrdinationApplication>>,
    reviews: RwLock<Vec<OrdinationReview>>,
}

impl InMemoryOrdinationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrdinationStore for InMemoryOrdinationStore {
    fn program(&self, id: ProgramId) -> DomainResult<Option<OrdinationProgram>> {
        Ok(self
            .programs
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    fn list_programs(&self, org_id: OrgId) -> DomainResult<Vec<OrdinationProgram>> {
        Ok(self
            .programs
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|p| p.org_id == org_id)
            .cloned()
            .collect())
    }

    fn insert_program_within_limit(
        &self,
        program: OrdinationProgram,
        max: i64,
    ) -> DomainResult<()> {
        // Transactional count-and-insert: the strict limit policy.
        let mut programs = self.programs.write().map_err(|_| poisoned())?;
        if max >= 0 {
            let count = programs.iter().filter(|p| p.org_id == program.org_id).count();
            if count as i64 >= max {
                return Err(DomainError::conflict("ordination program limit reached"));
            }
        }
        programs.push(program);
        Ok(())
    }

    fn update_program(&self, program: OrdinationProgram) -> DomainResult<()> {
        let mut programs = self.programs.write().map_err(|_| poisoned())?;
        let row = programs
            .iter_mut()
            .find(|p| p.id == program.id)
            .ok_or(DomainError::NotFound)?;
        *row = program;
        Ok(())
    }

    fn application(&self, id: ApplicationId) -> DomainResult<Option<OrdinationApplication>> {
        Ok(self
            .applications
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    fn insert_application(&self, application: OrdinationApplication) -> DomainResult<()> {
        let mut rows = self.applications.write().map_err(|_| poisoned())?;
        let open = rows.iter().any(|a| {
            a.program_id == application.program_id
                && a.user_id == application.user_id
                && !a.status.is_terminal()
        });
        if open {
            return Err(DomainError::conflict(
                "an application to this program is already open",
            ));
        }
        rows.push(application);
        Ok(())
    }

    fn update_application(&self, application: OrdinationApplication) -> DomainResult<()> {
        let mut rows = self.applications.write().map_err(|_| poisoned())?;
        let row = rows
            .iter_mut()
            .find(|a| a.id == application.id)
            .ok_or(DomainError::NotFound)?;
        *row = application;
        Ok(())
    }

    fn applications_for_org(&self, org_id: OrgId) -> DomainResult<Vec<OrdinationApplication>> {
        Ok(self
            .applications
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|a| a.org_id == org_id)
            .cloned()
            .collect())
    }

    fn applications_for_user(&self, user_id: UserId) -> DomainResult<Vec<OrdinationApplication>> {
        Ok(self
            .applications
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    fn insert_review(&self, review: OrdinationReview) -> DomainResult<()> {
        self.reviews.write().map_err(|_| poisoned())?.push(review);
        Ok(())
    }

    fn reviews(&self, application_id: ApplicationId) -> DomainResult<Vec<OrdinationReview>> {
        // Vec order is insertion order, i.e. submission order.
        Ok(self
            .reviews
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|r| r.application_id == application_id)
            .cloned()
            .collect())
    }
}

/// Pastoral meeting requests.
#[derive(Debug, Default)]
pub struct InMemoryMeetingStore {
    rows: RwLock<Vec<MeetingRequest>>,
}

impl InMemoryMeetingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeetingRequestStore for InMemoryMeetingStore {
    fn insert(&self, request: MeetingRequest) -> DomainResult<()> {
        self.rows.write().map_err(|_| poisoned())?.push(request);
        Ok(())
    }

    fn get(&self, org_id: OrgId, id: MeetingRequestId) -> DomainResult<Option<MeetingRequest>> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|r| r.org_id == org_id && r.id == id)
            .cloned())
    }

    fn list(&self, org_id: OrgId) -> DomainResult<Vec<MeetingRequest>> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|r| r.org_id == org_id)
            .cloned()
            .collect())
    }

    fn update(&self, request: MeetingRequest) -> DomainResult<()> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let row = rows
            .iter_mut()
            .find(|r| r.org_id == request.org_id && r.id == request.id)
            .ok_or(DomainError::NotFound)?;
        *row = request;
        Ok(())
    }
}

/// Public-facing content records (sermons, leaders, events, posts).
///
/// Soft-deleted rows are filtered out here: they resolve as nonexistent.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    sermons: RwLock<Vec<Sermon>>,
    leaders: RwLock<Vec<Leader>>,
    events: RwLock<Vec<OrgEvent>>,
    posts: RwLock<Vec<Post>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_sermon(&self, sermon: Sermon) -> DomainResult<()> {
        self.sermons.write().map_err(|_| poisoned())?.push(sermon);
        Ok(())
    }

    pub fn insert_leader(&self, leader: Leader) -> DomainResult<()> {
        self.leaders.write().map_err(|_| poisoned())?.push(leader);
        Ok(())
    }

    pub fn insert_event(&self, event: OrgEvent) -> DomainResult<()> {
        self.events.write().map_err(|_| poisoned())?.push(event);
        Ok(())
    }

    pub fn insert_post(&self, post: Post) -> DomainResult<()> {
        self.posts.write().map_err(|_| poisoned())?.push(post);
        Ok(())
    }

    pub fn sermons(&self, org_id: OrgId) -> DomainResult<Vec<Sermon>> {
        Ok(self
            .sermons
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|s| s.org_id == org_id && s.deleted_at.is_none())
            .cloned()
            .collect())
    }

    pub fn leaders(&self, org_id: OrgId) -> DomainResult<Vec<Leader>> {
        Ok(self
            .leaders
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|l| l.org_id == org_id && l.deleted_at.is_none())
            .cloned()
            .collect())
    }

    pub fn events(&self, org_id: OrgId) -> DomainResult<Vec<OrgEvent>> {
        Ok(self
            .events
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|e| e.org_id == org_id && e.deleted_at.is_none())
            .cloned()
            .collect())
    }

    pub fn posts(&self, org_id: OrgId) -> DomainResult<Vec<Post>> {
        Ok(self
            .posts
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|p| p.org_id == org_id && p.deleted_at.is_none())
            .cloned()
            .collect())
    }
}

/// Append-only activity log.
#[derive(Debug, Default)]
pub struct InMemoryActivityLog {
    rows: RwLock<Vec<ActivityEntry>>,
}

impl InMemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActivityLog for InMemoryActivityLog {
    fn append(&self, entry: ActivityEntry) -> DomainResult<()> {
        self.rows.write().map_err(|_| poisoned())?.push(entry);
        Ok(())
    }

    fn list(&self, org_id: OrgId) -> DomainResult<Vec<ActivityEntry>> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|e| e.org_id == org_id)
            .cloned()
            .collect())
    }
}
