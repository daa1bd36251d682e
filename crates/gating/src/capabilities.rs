//! Per-request capability computation.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use congregate_auth::{OrgRole, Viewer};
use congregate_core::DomainResult;
use congregate_entitlements::{EntitlementStore, FeatureKey};

use crate::directory::{Organization, PendingRequestSource};
use crate::resolver::RoleResolver;

/// What a specific viewer may see and do within one organization.
///
/// Ephemeral, computed per request, never persisted. Invariant: contains no
/// tier name, plan name, or billing identifier — every gated behavior is a
/// named boolean. Field names match the public wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub user_role: OrgRole,
    pub can_request_membership: bool,
    pub has_pending_membership_request: bool,
    pub feature_flags: BTreeMap<String, bool>,
}

/// Composes role resolution, pending-request lookups, and the entitlement
/// store into a single immutable [`Capabilities`] value.
pub struct CapabilityResolver {
    roles: RoleResolver,
    pending: Arc<dyn PendingRequestSource>,
    entitlements: Arc<EntitlementStore>,
}

impl CapabilityResolver {
    pub fn new(
        roles: RoleResolver,
        pending: Arc<dyn PendingRequestSource>,
        entitlements: Arc<EntitlementStore>,
    ) -> Self {
        Self {
            roles,
            pending,
            entitlements,
        }
    }

    /// Compute capabilities for `viewer` against `org`.
    ///
    /// `affiliation_claimed` is an external precondition supplied by the
    /// caller's context (the viewer has marked this org as their
    /// affiliation); it is an input here, never computed. `wanted_features`
    /// keeps policy lookups lazy: only the flags a handler actually needs
    /// are resolved.
    pub fn compute(
        &self,
        org: &Organization,
        viewer: &Viewer,
        affiliation_claimed: bool,
        wanted_features: &[FeatureKey],
    ) -> DomainResult<Capabilities> {
        let user_role = self.roles.resolve(org.id, viewer)?;

        let (can_request_membership, has_pending_membership_request) = if user_role.is_member() {
            (false, false)
        } else {
            let pending = match viewer.user_id() {
                Some(user_id) => self.pending.has_pending_request(org.id, user_id)?,
                None => false,
            };
            if pending {
                (false, true)
            } else {
                (viewer.is_authenticated() && affiliation_claimed, false)
            }
        };

        let mut feature_flags = BTreeMap::new();
        for key in wanted_features {
            let enabled = self.entitlements.has_feature(org.id, key)?;
            feature_flags.insert(key.as_str().to_string(), enabled);
        }

        Ok(Capabilities {
            user_role,
            can_request_membership,
            has_pending_membership_request,
            feature_flags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{Membership, MembershipDirectory};
    use chrono::Utc;
    use congregate_core::{DomainError, OrgId, UserId};
    use congregate_entitlements::{PolicyTable, TierPolicy, TierRef, TierSource, features};
    use std::collections::{HashMap, HashSet};
    use std::sync::RwLock;

    #[derive(Default)]
    struct Fixture {
        members: RwLock<HashMap<(OrgId, UserId), Membership>>,
        pending: RwLock<HashSet<(OrgId, UserId)>>,
        tiers: RwLock<HashMap<OrgId, TierRef>>,
    }

    impl MembershipDirectory for Fixture {
        fn membership(&self, org_id: OrgId, user_id: UserId) -> DomainResult<Option<Membership>> {
            Ok(self.members.read().unwrap().get(&(org_id, user_id)).cloned())
        }

        fn list_memberships(&self, org_id: OrgId) -> DomainResult<Vec<Membership>> {
            Ok(self
                .members
                .read()
                .unwrap()
                .values()
                .filter(|m| m.org_id == org_id)
                .cloned()
                .collect())
        }

        fn upsert_membership(&self, membership: Membership) -> DomainResult<()> {
            self.members
                .write()
                .unwrap()
                .insert((membership.org_id, membership.user_id), membership);
            Ok(())
        }

        fn remove_membership(&self, org_id: OrgId, user_id: UserId) -> DomainResult<()> {
            self.members
                .write()
                .unwrap()
                .remove(&(org_id, user_id))
                .map(|_| ())
                .ok_or(DomainError::NotFound)
        }
    }

    impl PendingRequestSource for Fixture {
        fn has_pending_request(&self, org_id: OrgId, user_id: UserId) -> DomainResult<bool> {
            Ok(self.pending.read().unwrap().contains(&(org_id, user_id)))
        }
    }

    impl TierSource for Fixture {
        fn tier_of(&self, org_id: OrgId) -> DomainResult<Option<TierRef>> {
            Ok(self.tiers.read().unwrap().get(&org_id).cloned())
        }
    }

    fn org(tier: &str) -> Organization {
        Organization {
            id: OrgId::new(),
            slug: "first-light".into(),
            name: "First Light".into(),
            about: None,
            city: None,
            website: None,
            tier: TierRef::new(tier),
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn resolver(fixture: Arc<Fixture>) -> CapabilityResolver {
        let table = PolicyTable::new().with_tier(
            TierRef::new("t_gold"),
            TierPolicy::new().with_feature(features::ORG_SERMONS, true),
        );
        CapabilityResolver::new(
            RoleResolver::new(fixture.clone()),
            fixture.clone(),
            Arc::new(EntitlementStore::new(table, fixture)),
        )
    }

    #[test]
    fn member_cannot_request_membership() {
        let fixture = Arc::new(Fixture::default());
        let org = org("t_gold");
        let user = UserId::new();
        fixture.tiers.write().unwrap().insert(org.id, TierRef::new("t_gold"));
        fixture
            .upsert_membership(Membership {
                org_id: org.id,
                user_id: user,
                role: OrgRole::Member,
                since: Utc::now(),
            })
            .unwrap();

        let caps = resolver(fixture)
            .compute(&org, &Viewer::authenticated(user), true, &[])
            .unwrap();
        assert_eq!(caps.user_role, OrgRole::Member);
        assert!(!caps.can_request_membership);
        assert!(!caps.has_pending_membership_request);
    }

    #[test]
    fn pending_request_blocks_a_second_one() {
        let fixture = Arc::new(Fixture::default());
        let org = org("t_gold");
        let user = UserId::new();
        fixture.tiers.write().unwrap().insert(org.id, TierRef::new("t_gold"));
        fixture.pending.write().unwrap().insert((org.id, user));

        let caps = resolver(fixture)
            .compute(&org, &Viewer::authenticated(user), true, &[])
            .unwrap();
        assert!(caps.has_pending_membership_request);
        assert!(!caps.can_request_membership);
    }

    #[test]
    fn visitor_can_request_only_with_claimed_affiliation() {
        let fixture = Arc::new(Fixture::default());
        let org = org("t_gold");
        let user = UserId::new();
        fixture.tiers.write().unwrap().insert(org.id, TierRef::new("t_gold"));

        let resolver = resolver(fixture);
        let viewer = Viewer::authenticated(user);
        assert!(resolver.compute(&org, &viewer, true, &[]).unwrap().can_request_membership);
        assert!(!resolver.compute(&org, &viewer, false, &[]).unwrap().can_request_membership);
        assert!(
            !resolver
                .compute(&org, &Viewer::Anonymous, true, &[])
                .unwrap()
                .can_request_membership
        );
    }

    #[test]
    fn feature_flags_resolve_lazily_for_wanted_keys_only() {
        let fixture = Arc::new(Fixture::default());
        let org = org("t_gold");
        fixture.tiers.write().unwrap().insert(org.id, TierRef::new("t_gold"));

        let caps = resolver(fixture)
            .compute(&org, &Viewer::Anonymous, false, &[features::ORG_SERMONS])
            .unwrap();
        assert_eq!(caps.feature_flags.len(), 1);
        assert_eq!(caps.feature_flags.get("org.sermons"), Some(&true));
    }

    #[test]
    fn serialized_capabilities_contain_no_tier_vocabulary() {
        let fixture = Arc::new(Fixture::default());
        let org = org("t_gold");
        fixture.tiers.write().unwrap().insert(org.id, TierRef::new("t_gold"));

        let caps = resolver(fixture)
            .compute(&org, &Viewer::Anonymous, false, &[features::ORG_SERMONS])
            .unwrap();
        let json = serde_json::to_string(&caps).unwrap();
        for needle in ["tier", "plan", "billing", "t_gold"] {
            assert!(!json.contains(needle), "leaked {needle} in {json}");
        }
    }
}
