//! Organization roles.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use congregate_core::DomainError;

/// A viewer's role within an organization.
///
/// The variants form a total order, weakest first, so that gate checks are
/// plain comparisons: `role >= OrgRole::Admin`. `None` is an unauthenticated
/// caller; `Visitor` is authenticated but holds no membership row. Only
/// `Member` and above are ever persisted.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    None,
    Visitor,
    Member,
    Moderator,
    Admin,
    Owner,
}

impl OrgRole {
    /// True for roles backed by a membership row.
    pub fn is_member(self) -> bool {
        self >= OrgRole::Member
    }

    /// True for roles that lead the organization (moderator and above).
    pub fn is_leader(self) -> bool {
        self >= OrgRole::Moderator
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrgRole::None => "none",
            OrgRole::Visitor => "visitor",
            OrgRole::Member => "member",
            OrgRole::Moderator => "moderator",
            OrgRole::Admin => "admin",
            OrgRole::Owner => "owner",
        }
    }
}

impl core::fmt::Display for OrgRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrgRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(OrgRole::None),
            "visitor" => Ok(OrgRole::Visitor),
            "member" => Ok(OrgRole::Member),
            "moderator" => Ok(OrgRole::Moderator),
            "admin" => Ok(OrgRole::Admin),
            "owner" => Ok(OrgRole::Owner),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}
