//! `congregate-projection` — public projection guard.
//!
//! Allow-list based DTO construction: each public-facing entity has a typed
//! view that is the only shape allowed to cross the trust boundary, backed
//! by a debug-build assertion that walks serialized payloads for forbidden
//! keys.

pub mod entities;
pub mod guard;
pub mod views;

pub use entities::{Leader, OrgEvent, Post, Sermon, UserProfile};
pub use guard::{FORBIDDEN_KEYS, Projectable, assert_no_forbidden_keys, project};
pub use views::{
    EventView, LeaderView, OrganizationProfileView, PostView, SermonView, UserPreviewView,
};
