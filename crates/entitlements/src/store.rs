//! Entitlement policy store.

use std::sync::Arc;

use congregate_core::{DomainError, DomainResult, OrgId};

use crate::keys::{FeatureKey, LimitKey};
use crate::policy::{PolicyTable, TierRef};

/// Resolves the opaque tier of an organization.
///
/// Implemented by the persistence layer; a `None` means the org has no tier
/// record at all, which is a configuration fault, not "no access".
pub trait TierSource: Send + Sync {
    fn tier_of(&self, org_id: OrgId) -> DomainResult<Option<TierRef>>;
}

impl<S> TierSource for Arc<S>
where
    S: TierSource + ?Sized,
{
    fn tier_of(&self, org_id: OrgId) -> DomainResult<Option<TierRef>> {
        (**self).tier_of(org_id)
    }
}

/// Answers feature/limit questions for an organization.
///
/// Contract: no public method ever returns a tier identifier, plan name, or
/// billing concept — only booleans and integers keyed by registered names.
pub struct EntitlementStore {
    table: PolicyTable,
    tiers: Arc<dyn TierSource>,
}

impl EntitlementStore {
    pub fn new(table: PolicyTable, tiers: Arc<dyn TierSource>) -> Self {
        Self { table, tiers }
    }

    pub fn has_feature(&self, org_id: OrgId, key: &FeatureKey) -> DomainResult<bool> {
        let tier = self.resolve_tier(org_id)?;
        Ok(self
            .table
            .policy(&tier)
            .map(|p| p.feature(key))
            .unwrap_or(false))
    }

    /// `-1` denotes "unlimited"; unregistered keys resolve to `0`.
    pub fn limit(&self, org_id: OrgId, key: &LimitKey) -> DomainResult<i64> {
        let tier = self.resolve_tier(org_id)?;
        Ok(self.table.policy(&tier).map(|p| p.limit(key)).unwrap_or(0))
    }

    /// Fail closed: a missing tier record is a fatal request error, never a
    /// silent "no access".
    fn resolve_tier(&self, org_id: OrgId) -> DomainResult<TierRef> {
        self.tiers
            .tier_of(org_id)?
            .ok_or_else(|| DomainError::storage(format!("no tier record for org {org_id}")))
    }
}
