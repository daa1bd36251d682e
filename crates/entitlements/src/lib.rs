//! `congregate-entitlements` — tier-to-entitlement policy store.
//!
//! Maps an organization's opaque internal tier to named boolean feature
//! flags and named integer limits. The tier itself never leaves this crate's
//! internals: the public surface speaks only feature/limit keys.

pub mod keys;
pub mod policy;
pub mod store;

pub use keys::{FeatureKey, LimitKey, UNLIMITED, features, limits};
pub use policy::{PolicyTable, TierPolicy, TierRef};
pub use store::{EntitlementStore, TierSource};
