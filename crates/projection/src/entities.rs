//! Internal shapes of public-facing content records.
//!
//! These carry fields that must never cross the trust boundary (storage
//! asset ids, counters, soft-delete markers, contact emails). They are kept
//! next to their view types in `views.rs` so that adding a field here forces
//! a deliberate decision about whether it becomes visible.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use congregate_core::{OrgId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sermon {
    pub id: Uuid,
    pub org_id: OrgId,
    pub title: String,
    pub speaker: String,
    pub delivered_at: DateTime<Utc>,
    pub video_url: Option<String>,
    // internal only
    pub storage_asset_id: Option<String>,
    pub view_count: u64,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leader {
    pub id: Uuid,
    pub org_id: OrgId,
    pub name: String,
    pub title: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    // internal only
    pub contact_email: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrgEvent {
    pub id: Uuid,
    pub org_id: OrgId,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
    // internal only
    pub internal_notes: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub org_id: OrgId,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
    // internal only
    pub draft_revisions: Value,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
    // internal only
    pub email: String,
    pub deleted_at: Option<DateTime<Utc>>,
}
