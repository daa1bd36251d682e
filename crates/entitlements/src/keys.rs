//! Stable feature and limit key names.
//!
//! Every gated behavior must be registered here as a named key before any
//! route consumes it. Keys are the *only* vocabulary the policy store speaks
//! to the rest of the system; tier names never cross this boundary.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Named boolean feature flag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureKey(Cow<'static, str>);

impl FeatureKey {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named integer limit. `-1` denotes "unlimited".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimitKey(Cow<'static, str>);

impl LimitKey {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for LimitKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sentinel limit value meaning "no cap".
pub const UNLIMITED: i64 = -1;

/// Registered feature flags.
pub mod features {
    use super::FeatureKey;

    /// Sermon library is visible/uploadable for the org.
    pub const ORG_SERMONS: FeatureKey = FeatureKey::from_static("org.sermons");
    /// Ordination programs and applications are available.
    pub const ORG_ORDINATIONS: FeatureKey = FeatureKey::from_static("org.ordinations");
    /// Published leadership profiles.
    pub const ORG_LEADERS: FeatureKey = FeatureKey::from_static("org.leaders");
    /// Public event listings.
    pub const ORG_EVENTS: FeatureKey = FeatureKey::from_static("org.events");
    /// Public posts/announcements.
    pub const ORG_POSTS: FeatureKey = FeatureKey::from_static("org.posts");
    /// Pastoral appointment (meeting request) workflow.
    pub const ORG_PASTORAL_APPOINTMENTS: FeatureKey =
        FeatureKey::from_static("org.pastoral.appointmentRequests");
    /// Whether viewers of this org's content are served ads.
    pub const VIEWER_ADS_REQUIRED: FeatureKey = FeatureKey::from_static("viewerAdsRequired");
}

/// Registered limits.
pub mod limits {
    use super::LimitKey;

    /// Maximum ordination programs per org.
    pub const ORDINATION_PROGRAMS: LimitKey = LimitKey::from_static("ordinationPrograms");
    /// Maximum sermon uploads per org.
    pub const SERMON_UPLOAD_LIMIT: LimitKey = LimitKey::from_static("sermonUploadLimit");
    /// Maximum published leader profiles per org.
    pub const LEADER_PROFILES: LimitKey = LimitKey::from_static("leaderProfiles");
}
