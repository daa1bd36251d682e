//! Role resolution: who is this viewer within this organization?

use std::sync::Arc;

use congregate_auth::{OrgRole, Viewer};
use congregate_core::{DomainResult, OrgId};

use crate::directory::MembershipDirectory;

/// Resolves a viewer's role for an organization.
///
/// This component reports fact only — it does not decide concealment. A
/// nonexistent organization simply has no membership rows, so the answer is
/// the same as "no access" from the caller's point of view. No side effects;
/// a single membership lookup.
pub struct RoleResolver {
    members: Arc<dyn MembershipDirectory>,
}

impl RoleResolver {
    pub fn new(members: Arc<dyn MembershipDirectory>) -> Self {
        Self { members }
    }

    pub fn resolve(&self, org_id: OrgId, viewer: &Viewer) -> DomainResult<OrgRole> {
        let Some(user_id) = viewer.user_id() else {
            return Ok(OrgRole::None);
        };

        match self.members.membership(org_id, user_id)? {
            Some(membership) => Ok(membership.role),
            None => Ok(OrgRole::Visitor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Membership;
    use chrono::Utc;
    use congregate_core::{DomainError, UserId};
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MemberMap(RwLock<HashMap<(OrgId, UserId), Membership>>);

    impl MembershipDirectory for MemberMap {
        fn membership(&self, org_id: OrgId, user_id: UserId) -> DomainResult<Option<Membership>> {
            Ok(self.0.read().unwrap().get(&(org_id, user_id)).cloned())
        }

        fn list_memberships(&self, org_id: OrgId) -> DomainResult<Vec<Membership>> {
            Ok(self
                .0
                .read()
                .unwrap()
                .values()
                .filter(|m| m.org_id == org_id)
                .cloned()
                .collect())
        }

        fn upsert_membership(&self, membership: Membership) -> DomainResult<()> {
            self.0
                .write()
                .unwrap()
                .insert((membership.org_id, membership.user_id), membership);
            Ok(())
        }

        fn remove_membership(&self, org_id: OrgId, user_id: UserId) -> DomainResult<()> {
            self.0
                .write()
                .unwrap()
                .remove(&(org_id, user_id))
                .map(|_| ())
                .ok_or(DomainError::NotFound)
        }
    }

    #[test]
    fn anonymous_resolves_to_none() {
        let resolver = RoleResolver::new(Arc::new(MemberMap::default()));
        let role = resolver.resolve(OrgId::new(), &Viewer::Anonymous).unwrap();
        assert_eq!(role, OrgRole::None);
    }

    #[test]
    fn authenticated_without_membership_is_visitor() {
        let resolver = RoleResolver::new(Arc::new(MemberMap::default()));
        let viewer = Viewer::authenticated(UserId::new());
        assert_eq!(resolver.resolve(OrgId::new(), &viewer).unwrap(), OrgRole::Visitor);
    }

    #[test]
    fn stored_role_is_returned() {
        let members = Arc::new(MemberMap::default());
        let org = OrgId::new();
        let user = UserId::new();
        members
            .upsert_membership(Membership {
                org_id: org,
                user_id: user,
                role: OrgRole::Admin,
                since: Utc::now(),
            })
            .unwrap();

        let resolver = RoleResolver::new(members);
        let viewer = Viewer::authenticated(user);
        assert_eq!(resolver.resolve(org, &viewer).unwrap(), OrgRole::Admin);
    }
}
