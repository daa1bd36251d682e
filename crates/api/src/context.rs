use congregate_auth::{OrgRole, Viewer};
use congregate_gating::Organization;

/// Viewer identity for a request, attached by the auth middleware.
///
/// Immutable and always present (public routes run as `Anonymous`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ViewerContext {
    viewer: Viewer,
}

impl ViewerContext {
    pub fn new(viewer: Viewer) -> Self {
        Self { viewer }
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }
}

/// Organization scope attached by a concealment gate after a positive
/// decision. Handlers behind a gate can rely on its presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgContext {
    organization: Organization,
    role: OrgRole,
}

impl OrgContext {
    pub fn new(organization: Organization, role: OrgRole) -> Self {
        Self { organization, role }
    }

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    pub fn role(&self) -> OrgRole {
        self.role
    }
}
