//! Organization/membership records and the directory traits the gating
//! engine reads through. Implementations live in `congregate-infra`.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use congregate_auth::OrgRole;
use congregate_core::{DomainResult, OrgId, UserId};
use congregate_entitlements::TierRef;

/// An organization record as the gating engine sees it.
///
/// Intentionally not `Serialize`: anything leaving the trust boundary goes
/// through a typed public view (`congregate-projection`). `tier` and
/// `deleted_at` in particular must never render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: OrgId,
    pub slug: String,
    pub name: String,
    pub about: Option<String>,
    pub city: Option<String>,
    pub website: Option<String>,
    pub tier: TierRef,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Organization {
    /// Soft-deleted organizations resolve as nonexistent everywhere.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A stored membership row. At most one per (org, user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub org_id: OrgId,
    pub user_id: UserId,
    pub role: OrgRole,
    pub since: DateTime<Utc>,
}

/// Read access to organization records.
pub trait OrganizationDirectory: Send + Sync {
    fn organization(&self, id: OrgId) -> DomainResult<Option<Organization>>;
    fn organization_by_slug(&self, slug: &str) -> DomainResult<Option<Organization>>;
}

/// Read/write access to membership rows.
pub trait MembershipDirectory: Send + Sync {
    fn membership(&self, org_id: OrgId, user_id: UserId) -> DomainResult<Option<Membership>>;
    fn list_memberships(&self, org_id: OrgId) -> DomainResult<Vec<Membership>>;
    fn upsert_membership(&self, membership: Membership) -> DomainResult<()>;
    fn remove_membership(&self, org_id: OrgId, user_id: UserId) -> DomainResult<()>;
}

/// Whether a pending membership request exists for (org, user).
pub trait PendingRequestSource: Send + Sync {
    fn has_pending_request(&self, org_id: OrgId, user_id: UserId) -> DomainResult<bool>;
}

macro_rules! impl_arc_forward {
    ($trait:ident { $($fn:ident(&self $(, $arg:ident : $ty:ty)*) -> $ret:ty;)* }) => {
        impl<S> $trait for Arc<S>
        where
            S: $trait + ?Sized,
        {
            $(
                fn $fn(&self $(, $arg: $ty)*) -> $ret {
                    (**self).$fn($($arg),*)
                }
            )*
        }
    };
}

impl_arc_forward!(OrganizationDirectory {
    organization(&self, id: OrgId) -> DomainResult<Option<Organization>>;
    organization_by_slug(&self, slug: &str) -> DomainResult<Option<Organization>>;
});

impl_arc_forward!(MembershipDirectory {
    membership(&self, org_id: OrgId, user_id: UserId) -> DomainResult<Option<Membership>>;
    list_memberships(&self, org_id: OrgId) -> DomainResult<Vec<Membership>>;
    upsert_membership(&self, membership: Membership) -> DomainResult<()>;
    remove_membership(&self, org_id: OrgId, user_id: UserId) -> DomainResult<()>;
});

impl_arc_forward!(PendingRequestSource {
    has_pending_request(&self, org_id: OrgId, user_id: UserId) -> DomainResult<bool>;
});
