//! Ordination programs, applications, and the append-only review trail.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use congregate_core::{ApplicationId, DomainError, DomainResult, OrgId, ProgramId, ReviewId, UserId};
use congregate_entitlements::{EntitlementStore, features, limits};
use congregate_gating::Organization;

use crate::activity::{ActivityEntry, ActivityLog, record};

/// An ordination program an org offers. `schema_version` increments whenever
/// `form_schema` changes materially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinationProgram {
    pub id: ProgramId,
    pub org_id: OrgId,
    pub title: String,
    pub form_schema: Value,
    pub schema_version: u32,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
    RequestInfo,
}

impl ApplicationStatus {
    /// `request_info` loops back to the applicant; only approve/reject end
    /// the application.
    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject,
    RequestInfo,
}

impl ReviewDecision {
    /// The application status derived from this decision.
    pub fn derived_status(self) -> ApplicationStatus {
        match self {
            ReviewDecision::Approve => ApplicationStatus::Approved,
            ReviewDecision::Reject => ApplicationStatus::Rejected,
            ReviewDecision::RequestInfo => ApplicationStatus::RequestInfo,
        }
    }
}

/// An applicant's submission. The program's `form_schema`/`schema_version`
/// are snapshotted at submission time and never re-derived, so the
/// application's interpretation stays stable when the program's form changes
/// later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinationApplication {
    pub id: ApplicationId,
    pub program_id: ProgramId,
    pub org_id: OrgId,
    pub user_id: UserId,
    pub status: ApplicationStatus,
    pub answers: Value,
    pub program_schema_version: u32,
    pub program_schema_snapshot: Value,
    pub submitted_at: DateTime<Utc>,
}

/// One reviewer decision. Append-only; each review is a transition event,
/// never a replacement of history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinationReview {
    pub id: ReviewId,
    pub application_id: ApplicationId,
    pub reviewer_user_id: UserId,
    pub decision: ReviewDecision,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persistence seam for the ordination workflow.
///
/// `insert_program_within_limit` performs its count and insert atomically
/// (the strict limit policy). `insert_application` enforces at-most-one
/// non-terminal application per (program, user) and reports `Conflict`.
pub trait OrdinationStore: Send + Sync {
    fn program(&self, id: ProgramId) -> DomainResult<Option<OrdinationProgram>>;
    fn list_programs(&self, org_id: OrgId) -> DomainResult<Vec<OrdinationProgram>>;
    fn insert_program_within_limit(&self, program: OrdinationProgram, max: i64)
    -> DomainResult<()>;
    fn update_program(&self, program: OrdinationProgram) -> DomainResult<()>;

    fn application(&self, id: ApplicationId) -> DomainResult<Option<OrdinationApplication>>;
    fn insert_application(&self, application: OrdinationApplication) -> DomainResult<()>;
    fn update_application(&self, application: OrdinationApplication) -> DomainResult<()>;
    fn applications_for_org(&self, org_id: OrgId) -> DomainResult<Vec<OrdinationApplication>>;
    fn applications_for_user(&self, user_id: UserId) -> DomainResult<Vec<OrdinationApplication>>;

    fn insert_review(&self, review: OrdinationReview) -> DomainResult<()>;
    /// Reviews in submission order.
    fn reviews(&self, application_id: ApplicationId) -> DomainResult<Vec<OrdinationReview>>;
}

impl<S> OrdinationStore for Arc<S>
where
    S: OrdinationStore + ?Sized,
{
    fn program(&self, id: ProgramId) -> DomainResult<Option<OrdinationProgram>> {
        (**self).program(id)
    }

    fn list_programs(&self, org_id: OrgId) -> DomainResult<Vec<OrdinationProgram>> {
        (**self).list_programs(org_id)
    }

    fn insert_program_within_limit(
        &self,
        program: OrdinationProgram,
        max: i64,
    ) -> DomainResult<()> {
        (**self).insert_program_within_limit(program, max)
    }

    fn update_program(&self, program: OrdinationProgram) -> DomainResult<()> {
        (**self).update_program(program)
    }

    fn application(&self, id: ApplicationId) -> DomainResult<Option<OrdinationApplication>> {
        (**self).application(id)
    }

    fn insert_application(&self, application: OrdinationApplication) -> DomainResult<()> {
        (**self).insert_application(application)
    }

    fn update_application(&self, application: OrdinationApplication) -> DomainResult<()> {
        (**self).update_application(application)
    }

    fn applications_for_org(&self, org_id: OrgId) -> DomainResult<Vec<OrdinationApplication>> {
        (**self).applications_for_org(org_id)
    }

    fn applications_for_user(&self, user_id: UserId) -> DomainResult<Vec<OrdinationApplication>> {
        (**self).applications_for_user(user_id)
    }

    fn insert_review(&self, review: OrdinationReview) -> DomainResult<()> {
        (**self).insert_review(review)
    }

    fn reviews(&self, application_id: ApplicationId) -> DomainResult<Vec<OrdinationReview>> {
        (**self).reviews(application_id)
    }
}

pub struct OrdinationWorkflow {
    store: Arc<dyn OrdinationStore>,
    entitlements: Arc<EntitlementStore>,
    activity: Arc<dyn ActivityLog>,
}

impl OrdinationWorkflow {
    pub fn new(
        store: Arc<dyn OrdinationStore>,
        entitlements: Arc<EntitlementStore>,
        activity: Arc<dyn ActivityLog>,
    ) -> Self {
        Self {
            store,
            entitlements,
            activity,
        }
    }

    /// Program management exists only for orgs with the ordinations
    /// feature; without it the whole surface resolves as nonexistent,
    /// independent of whatever program quota the tier carries.
    fn ensure_enabled(&self, org_id: OrgId) -> DomainResult<()> {
        if self
            .entitlements
            .has_feature(org_id, &features::ORG_ORDINATIONS)?
        {
            Ok(())
        } else {
            Err(DomainError::NotFound)
        }
    }

    /// Create a program, enforcing the per-org program limit strictly: the
    /// store applies count-and-insert under one guard, so concurrent
    /// creations cannot overshoot.
    pub fn create_program(
        &self,
        org: &Organization,
        title: String,
        form_schema: Value,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<OrdinationProgram> {
        self.ensure_enabled(org.id)?;
        if title.trim().is_empty() {
            return Err(DomainError::validation("program title must not be empty"));
        }

        let max = self.entitlements.limit(org.id, &limits::ORDINATION_PROGRAMS)?;
        let program = OrdinationProgram {
            id: ProgramId::new(),
            org_id: org.id,
            title,
            form_schema,
            schema_version: 1,
            enabled: true,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_program_within_limit(program.clone(), max)?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(
                org.id,
                actor,
                "ordination_program.created",
                "ordination_program",
                program.id,
                now,
            ),
        );
        Ok(program)
    }

    /// Update a program. A material `form_schema` change increments
    /// `schema_version`; existing applications keep their snapshots.
    pub fn update_program(
        &self,
        org_id: OrgId,
        id: ProgramId,
        title: Option<String>,
        form_schema: Option<Value>,
        enabled: Option<bool>,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<OrdinationProgram> {
        self.ensure_enabled(org_id)?;
        let mut program = self.program_in_org(org_id, id)?;

        if let Some(title) = title {
            if title.trim().is_empty() {
                return Err(DomainError::validation("program title must not be empty"));
            }
            program.title = title;
        }
        if let Some(schema) = form_schema {
            if schema != program.form_schema {
                program.schema_version += 1;
                program.form_schema = schema;
            }
        }
        if let Some(enabled) = enabled {
            program.enabled = enabled;
        }
        program.updated_at = now;
        self.store.update_program(program.clone())?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(
                org_id,
                actor,
                "ordination_program.updated",
                "ordination_program",
                program.id,
                now,
            )
            .with_metadata(serde_json::json!({ "schema_version": program.schema_version })),
        );
        Ok(program)
    }

    pub fn programs(&self, org_id: OrgId) -> DomainResult<Vec<OrdinationProgram>> {
        self.store.list_programs(org_id)
    }

    /// Submit an application to an enabled program, snapshotting the
    /// program's current form schema. Programs of orgs without the
    /// ordinations feature resolve as nonexistent.
    pub fn submit_application(
        &self,
        program_id: ProgramId,
        user_id: UserId,
        answers: Value,
        now: DateTime<Utc>,
    ) -> DomainResult<OrdinationApplication> {
        let program = self
            .store
            .program(program_id)?
            .filter(|p| p.enabled)
            .ok_or(DomainError::NotFound)?;

        if !self
            .entitlements
            .has_feature(program.org_id, &features::ORG_ORDINATIONS)?
        {
            return Err(DomainError::NotFound);
        }

        let application = OrdinationApplication {
            id: ApplicationId::new(),
            program_id,
            org_id: program.org_id,
            user_id,
            status: ApplicationStatus::Pending,
            answers,
            program_schema_version: program.schema_version,
            program_schema_snapshot: program.form_schema.clone(),
            submitted_at: now,
        };
        self.store.insert_application(application.clone())?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(
                program.org_id,
                user_id,
                "ordination_application.submitted",
                "ordination_application",
                application.id,
                now,
            )
            .with_metadata(serde_json::json!({ "program_id": program.id })),
        );
        Ok(application)
    }

    /// Explicitly claim a pending application for review.
    pub fn begin_review(
        &self,
        org_id: OrgId,
        id: ApplicationId,
        reviewer: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<OrdinationApplication> {
        let mut application = self.application_in_org(org_id, id)?;
        if application.status != ApplicationStatus::Pending {
            return Err(DomainError::invalid_state(format!(
                "application is {:?}, expected pending",
                application.status
            )));
        }

        application.status = ApplicationStatus::UnderReview;
        self.store.update_application(application.clone())?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(
                org_id,
                reviewer,
                "ordination_application.review_started",
                "ordination_application",
                application.id,
                now,
            ),
        );
        Ok(application)
    }

    /// Append a review decision. Prior reviews are never replaced; the
    /// application's live status becomes the decision of this, the most
    /// recent, review. Terminal applications accept no further reviews.
    pub fn append_review(
        &self,
        org_id: OrgId,
        id: ApplicationId,
        reviewer: UserId,
        decision: ReviewDecision,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<OrdinationReview> {
        let mut application = self.application_in_org(org_id, id)?;
        if application.status.is_terminal() {
            return Err(DomainError::invalid_state(format!(
                "application is already {:?}",
                application.status
            )));
        }

        let review = OrdinationReview {
            id: ReviewId::new(),
            application_id: application.id,
            reviewer_user_id: reviewer,
            decision,
            notes,
            created_at: now,
        };
        self.store.insert_review(review.clone())?;

        application.status = decision.derived_status();
        self.store.update_application(application.clone())?;

        record(
            self.activity.as_ref(),
            ActivityEntry::new(
                org_id,
                reviewer,
                "ordination_application.reviewed",
                "ordination_application",
                application.id,
                now,
            )
            .with_metadata(serde_json::json!({ "decision": decision })),
        );
        Ok(review)
    }

    pub fn reviews(&self, org_id: OrgId, id: ApplicationId) -> DomainResult<Vec<OrdinationReview>> {
        let application = self.application_in_org(org_id, id)?;
        self.store.reviews(application.id)
    }

    pub fn applications_for_org(&self, org_id: OrgId) -> DomainResult<Vec<OrdinationApplication>> {
        self.store.applications_for_org(org_id)
    }

    pub fn applications_for_user(&self, user_id: UserId) -> DomainResult<Vec<OrdinationApplication>> {
        self.store.applications_for_user(user_id)
    }

    pub fn application_for_user(
        &self,
        user_id: UserId,
        id: ApplicationId,
    ) -> DomainResult<OrdinationApplication> {
        self.store
            .application(id)?
            .filter(|a| a.user_id == user_id)
            .ok_or(DomainError::NotFound)
    }

    /// Scope check: objects outside the caller's authorized org resolve as
    /// absent, never as "belongs to someone else".
    fn program_in_org(&self, org_id: OrgId, id: ProgramId) -> DomainResult<OrdinationProgram> {
        self.store
            .program(id)?
            .filter(|p| p.org_id == org_id)
            .ok_or(DomainError::NotFound)
    }

    fn application_in_org(
        &self,
        org_id: OrgId,
        id: ApplicationId,
    ) -> DomainResult<OrdinationApplication> {
        self.store
            .application(id)?
            .filter(|a| a.org_id == org_id)
            .ok_or(DomainError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_info_is_not_terminal() {
        assert!(!ApplicationStatus::RequestInfo.is_terminal());
        assert!(!ApplicationStatus::Pending.is_terminal());
        assert!(!ApplicationStatus::UnderReview.is_terminal());
        assert!(ApplicationStatus::Approved.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
    }

    #[test]
    fn decisions_map_to_derived_statuses() {
        assert_eq!(ReviewDecision::Approve.derived_status(), ApplicationStatus::Approved);
        assert_eq!(ReviewDecision::Reject.derived_status(), ApplicationStatus::Rejected);
        assert_eq!(
            ReviewDecision::RequestInfo.derived_status(),
            ApplicationStatus::RequestInfo
        );
    }
}
