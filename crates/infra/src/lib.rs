//! `congregate-infra` — store implementations.
//!
//! In-memory implementations of the directory, workflow, and activity-log
//! traits, used for dev wiring and tests. A relational backend would
//! implement the same traits with real constraints and transactions.

pub mod memory;

pub use memory::{
    InMemoryActivityLog, InMemoryContentStore, InMemoryDirectory, InMemoryMeetingStore,
    InMemoryMembershipRequests, InMemoryOrdinationStore,
};
