//! Tier policy table.
//!
//! The mapping from tiers to features/limits is configuration supplied by an
//! external policy source; this module only holds and queries it.

use std::collections::{BTreeMap, HashMap};

use crate::keys::{FeatureKey, LimitKey};

/// Opaque reference to an organization's internal tier.
///
/// Deliberately does **not** implement `Serialize`: a tier identifier must
/// never be rendered into any response or projection. It exists only to key
/// the policy table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TierRef(String);

impl TierRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Feature flags and limits granted by one tier.
#[derive(Debug, Clone, Default)]
pub struct TierPolicy {
    features: BTreeMap<FeatureKey, bool>,
    limits: BTreeMap<LimitKey, i64>,
}

impl TierPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feature(mut self, key: FeatureKey, enabled: bool) -> Self {
        self.features.insert(key, enabled);
        self
    }

    pub fn with_limit(mut self, key: LimitKey, value: i64) -> Self {
        self.limits.insert(key, value);
        self
    }

    /// Unregistered keys are `false`: deny by default.
    pub fn feature(&self, key: &FeatureKey) -> bool {
        self.features.get(key).copied().unwrap_or(false)
    }

    /// Unregistered limits are `0`: nothing allowed by default.
    pub fn limit(&self, key: &LimitKey) -> i64 {
        self.limits.get(key).copied().unwrap_or(0)
    }
}

/// All known tier policies.
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    tiers: HashMap<TierRef, TierPolicy>,
}

impl PolicyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier(mut self, tier: TierRef, policy: TierPolicy) -> Self {
        self.tiers.insert(tier, policy);
        self
    }

    pub fn policy(&self, tier: &TierRef) -> Option<&TierPolicy> {
        self.tiers.get(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{UNLIMITED, features, limits};

    #[test]
    fn unregistered_keys_deny_by_default() {
        let policy = TierPolicy::new();
        assert!(!policy.feature(&features::ORG_SERMONS));
        assert_eq!(policy.limit(&limits::SERMON_UPLOAD_LIMIT), 0);
    }

    #[test]
    fn registered_keys_resolve() {
        let policy = TierPolicy::new()
            .with_feature(features::ORG_ORDINATIONS, true)
            .with_limit(limits::ORDINATION_PROGRAMS, UNLIMITED);
        assert!(policy.feature(&features::ORG_ORDINATIONS));
        assert_eq!(policy.limit(&limits::ORDINATION_PROGRAMS), UNLIMITED);
    }
}
