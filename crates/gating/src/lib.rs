//! `congregate-gating` — who may see and do what, per (organization, viewer).
//!
//! Composes role resolution, the entitlement policy store, and
//! pending-request lookups into immutable per-request [`Capabilities`]
//! values, and hosts the pure concealment-gate decision consumed by the API
//! middlewares.

pub mod capabilities;
pub mod directory;
pub mod gate;
pub mod resolver;

pub use capabilities::{Capabilities, CapabilityResolver};
pub use directory::{
    Membership, MembershipDirectory, Organization, OrganizationDirectory, PendingRequestSource,
};
pub use gate::{ADMIN_MIN_ROLE, GateDecision, MODERATOR_MIN_ROLE, evaluate};
pub use resolver::RoleResolver;
