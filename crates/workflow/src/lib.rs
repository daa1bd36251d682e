//! `congregate-workflow` — request/review workflow engine.
//!
//! A shared shape parameterized per workflow type: create, guarded
//! transitions, a terminal state, and an audit trail. Three concrete
//! instances: membership requests, ordination applications, and pastoral
//! meeting requests. Persistence is reached only through the store traits
//! defined alongside each workflow; the concurrency-sensitive invariants
//! (pending uniqueness, compare-and-set transitions, limit enforcement)
//! live at that seam.

pub mod activity;
pub mod meetings;
pub mod membership;
pub mod ordination;

pub use activity::{ActivityEntry, ActivityLog, record};
pub use meetings::{MeetingRequest, MeetingRequestStore, MeetingStatus, MeetingWorkflow};
pub use membership::{
    MembershipRequest, MembershipRequestStatus, MembershipRequestStore, MembershipWorkflow,
};
pub use ordination::{
    ApplicationStatus, OrdinationApplication, OrdinationProgram, OrdinationReview, OrdinationStore,
    OrdinationWorkflow, ReviewDecision,
};
