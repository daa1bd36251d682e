//! Shared service wiring handed to every handler via `Extension`.

use std::sync::Arc;

use congregate_entitlements::{
    EntitlementStore, PolicyTable, TierPolicy, TierRef, UNLIMITED, features, limits,
};
use congregate_gating::{CapabilityResolver, RoleResolver};
use congregate_infra::{
    InMemoryActivityLog, InMemoryContentStore, InMemoryDirectory, InMemoryMeetingStore,
    InMemoryMembershipRequests, InMemoryOrdinationStore,
};
use congregate_workflow::{MeetingWorkflow, MembershipWorkflow, OrdinationWorkflow};

/// One wiring of stores and workflow engines, built once at startup and
/// shared immutably across requests.
pub struct AppServices {
    pub directory: Arc<InMemoryDirectory>,
    pub requests: Arc<InMemoryMembershipRequests>,
    pub ordination_store: Arc<InMemoryOrdinationStore>,
    pub meeting_store: Arc<InMemoryMeetingStore>,
    pub content: Arc<InMemoryContentStore>,
    pub activity: Arc<InMemoryActivityLog>,
    pub entitlements: Arc<EntitlementStore>,
    pub roles: RoleResolver,
    pub capabilities: CapabilityResolver,
    pub membership: MembershipWorkflow,
    pub ordination: OrdinationWorkflow,
    pub meetings: MeetingWorkflow,
}

impl AppServices {
    /// In-memory wiring over a given policy table.
    pub fn in_memory(policy: PolicyTable) -> Arc<Self> {
        let directory = Arc::new(InMemoryDirectory::new());
        let requests = Arc::new(InMemoryMembershipRequests::new());
        let ordination_store = Arc::new(InMemoryOrdinationStore::new());
        let meeting_store = Arc::new(InMemoryMeetingStore::new());
        let content = Arc::new(InMemoryContentStore::new());
        let activity = Arc::new(InMemoryActivityLog::new());

        let entitlements = Arc::new(EntitlementStore::new(policy, directory.clone()));
        let roles = RoleResolver::new(directory.clone());
        let capabilities = CapabilityResolver::new(
            RoleResolver::new(directory.clone()),
            requests.clone(),
            entitlements.clone(),
        );
        let membership = MembershipWorkflow::new(
            requests.clone(),
            directory.clone(),
            activity.clone(),
        );
        let ordination = OrdinationWorkflow::new(
            ordination_store.clone(),
            entitlements.clone(),
            activity.clone(),
        );
        let meetings = MeetingWorkflow::new(
            meeting_store.clone(),
            entitlements.clone(),
            activity.clone(),
        );

        Arc::new(Self {
            directory,
            requests,
            ordination_store,
            meeting_store,
            content,
            activity,
            entitlements,
            roles,
            capabilities,
            membership,
            ordination,
            meetings,
        })
    }
}

/// Policy table for the default deployment. Tier identifiers stay internal;
/// only the named flags and limits below ever reach a response.
pub fn default_policy_table() -> PolicyTable {
    PolicyTable::new()
        .with_tier(TierRef::new("t_basic"), TierPolicy::new())
        .with_tier(
            TierRef::new("t_standard"),
            TierPolicy::new()
                .with_feature(features::ORG_SERMONS, true)
                .with_feature(features::ORG_LEADERS, true)
                .with_feature(features::ORG_EVENTS, true)
                .with_feature(features::ORG_POSTS, true)
                .with_feature(features::VIEWER_ADS_REQUIRED, true)
                .with_limit(limits::SERMON_UPLOAD_LIMIT, 25)
                .with_limit(limits::LEADER_PROFILES, 5),
        )
        .with_tier(
            TierRef::new("t_full"),
            TierPolicy::new()
                .with_feature(features::ORG_SERMONS, true)
                .with_feature(features::ORG_LEADERS, true)
                .with_feature(features::ORG_EVENTS, true)
                .with_feature(features::ORG_POSTS, true)
                .with_feature(features::ORG_ORDINATIONS, true)
                .with_feature(features::ORG_PASTORAL_APPOINTMENTS, true)
                .with_limit(limits::ORDINATION_PROGRAMS, 3)
                .with_limit(limits::SERMON_UPLOAD_LIMIT, UNLIMITED)
                .with_limit(limits::LEADER_PROFILES, UNLIMITED),
        )
}
