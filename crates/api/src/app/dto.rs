//! Wire DTOs for the HTTP surface.
//!
//! Public payloads go through the projection crate's typed views; the shapes
//! here cover request bodies and the authorized (admin/leader/applicant)
//! responses, which may carry workflow detail but still no tier, plan, or
//! billing vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use congregate_auth::OrgRole;
use congregate_core::{
    ActivityEntryId, ApplicationId, MeetingRequestId, MembershipRequestId, ProgramId, ReviewId,
    UserId,
};
use congregate_gating::{Capabilities, Membership};
use congregate_projection::OrganizationProfileView;
use congregate_workflow::{
    ActivityEntry, ApplicationStatus, MeetingRequest, MeetingStatus, MembershipRequest,
    MembershipRequestStatus, OrdinationApplication, OrdinationProgram, OrdinationReview,
    ReviewDecision,
};

// ---- request bodies ----

#[derive(Debug, Deserialize)]
pub struct MembershipRequestBody {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramBody {
    pub title: String,
    pub form_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgramBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub form_schema: Option<Value>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitApplicationBody {
    pub answers: Value,
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub decision: ReviewDecision,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleBody {
    pub role: OrgRole,
}

#[derive(Debug, Deserialize)]
pub struct MeetingRequestBody {
    #[serde(default)]
    pub topic: Option<String>,
}

// ---- responses ----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgProfileResponse {
    pub organization: OrganizationProfileView,
    pub capabilities: Capabilities,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequestView {
    pub id: MembershipRequestId,
    pub user_id: UserId,
    pub status: MembershipRequestStatus,
    pub notes: Option<String>,
    pub requested_at: DateTime<Utc>,
    pub decided_by: Option<UserId>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<MembershipRequest> for MembershipRequestView {
    fn from(r: MembershipRequest) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            status: r.status,
            notes: r.notes,
            requested_at: r.requested_at,
            decided_by: r.decided_by,
            decided_at: r.decided_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub user_id: UserId,
    pub role: OrgRole,
    pub since: DateTime<Utc>,
}

impl From<Membership> for MemberView {
    fn from(m: Membership) -> Self {
        Self {
            user_id: m.user_id,
            role: m.role,
            since: m.since,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramView {
    pub id: ProgramId,
    pub title: String,
    pub form_schema: Value,
    pub schema_version: u32,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrdinationProgram> for ProgramView {
    fn from(p: OrdinationProgram) -> Self {
        Self {
            id: p.id,
            title: p.title,
            form_schema: p.form_schema,
            schema_version: p.schema_version,
            enabled: p.enabled,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub program_id: ProgramId,
    pub user_id: UserId,
    pub status: ApplicationStatus,
    pub answers: Value,
    pub program_schema_version: u32,
    pub program_schema_snapshot: Value,
    pub submitted_at: DateTime<Utc>,
}

impl From<OrdinationApplication> for ApplicationView {
    fn from(a: OrdinationApplication) -> Self {
        Self {
            id: a.id,
            program_id: a.program_id,
            user_id: a.user_id,
            status: a.status,
            answers: a.answers,
            program_schema_version: a.program_schema_version,
            program_schema_snapshot: a.program_schema_snapshot,
            submitted_at: a.submitted_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: ReviewId,
    pub reviewer_user_id: UserId,
    pub decision: ReviewDecision,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OrdinationReview> for ReviewView {
    fn from(r: OrdinationReview) -> Self {
        Self {
            id: r.id,
            reviewer_user_id: r.reviewer_user_id,
            decision: r.decision,
            notes: r.notes,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequestView {
    pub id: MeetingRequestId,
    pub requester_id: UserId,
    pub topic: Option<String>,
    pub status: MeetingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_by: Option<UserId>,
}

impl From<MeetingRequest> for MeetingRequestView {
    fn from(r: MeetingRequest) -> Self {
        Self {
            id: r.id,
            requester_id: r.requester_id,
            topic: r.topic,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
            closed_by: r.closed_by,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
    pub id: ActivityEntryId,
    pub actor_id: UserId,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    pub metadata: Value,
    pub at: DateTime<Utc>,
}

impl From<ActivityEntry> for ActivityView {
    fn from(e: ActivityEntry) -> Self {
        Self {
            id: e.id,
            actor_id: e.actor_id,
            action: e.action,
            target_type: e.target_type,
            target_id: e.target_id,
            metadata: e.metadata,
            at: e.at,
        }
    }
}
