//! The concealment gate decision.
//!
//! Pure policy: given the minimum accepted role, the organization lookup
//! result, and the viewer's resolved role, decide whether the request
//! proceeds. There are exactly two outcomes — an attacker probing an
//! org-admin route can never distinguish "no such org" from "org exists but
//! you lack access" from "not logged in". The HTTP rendering of `Conceal`
//! lives in the API layer and is byte-identical across all negative paths.

use congregate_auth::{OrgRole, Viewer};

use crate::directory::Organization;

/// Minimum role for the admin gate.
pub const ADMIN_MIN_ROLE: OrgRole = OrgRole::Admin;
/// Minimum role for the moderator gate.
pub const MODERATOR_MIN_ROLE: OrgRole = OrgRole::Moderator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Attach `{ organization, role }` to the request context and continue.
    Allow { role: OrgRole },
    /// Terminate with the uniform not-found outcome.
    Conceal,
}

/// Evaluate the gate. Checked in order: authentication, organization
/// existence (soft-deleted counts as nonexistent), then role.
pub fn evaluate(
    min_role: OrgRole,
    viewer: &Viewer,
    org: Option<&Organization>,
    role: OrgRole,
) -> GateDecision {
    if !viewer.is_authenticated() {
        return GateDecision::Conceal;
    }

    let Some(org) = org else {
        return GateDecision::Conceal;
    };
    if !org.is_active() {
        return GateDecision::Conceal;
    }

    if role < min_role {
        return GateDecision::Conceal;
    }

    GateDecision::Allow { role }
}
