//! Concealment gate middlewares.
//!
//! Two variants differing only in the minimum accepted role: the admin gate
//! (owner, admin) and the moderator gate (owner, admin, moderator). Every
//! negative outcome — unauthenticated caller, unknown org, insufficient
//! role — is the same uniform not-found response; no code path here ever
//! produces a 401/403-class response.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};

use congregate_auth::OrgRole;
use congregate_core::OrgId;
use congregate_gating::{
    GateDecision, MembershipDirectory, OrganizationDirectory, RoleResolver, evaluate,
};

use crate::app::errors;
use crate::context::{OrgContext, ViewerContext};

#[derive(Clone)]
pub struct GateState {
    pub orgs: Arc<dyn OrganizationDirectory>,
    pub members: Arc<dyn MembershipDirectory>,
    pub min_role: OrgRole,
}

/// Gate a request on the `:org` path parameter.
///
/// The gate completes before any handler runs, so unauthorized requests
/// never reach mutating code.
pub async fn concealment_gate(
    State(state): State<GateState>,
    Path(params): Path<HashMap<String, String>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(viewer_ctx) = req.extensions().get::<ViewerContext>().copied() else {
        return errors::concealed_not_found();
    };
    let viewer = viewer_ctx.viewer();

    // An unparseable org id is indistinguishable from an unknown one.
    let org = match params.get("org").and_then(|raw| raw.parse::<OrgId>().ok()) {
        Some(org_id) => match state.orgs.organization(org_id) {
            Ok(org) => org,
            Err(e) => return errors::domain_error_to_response(e),
        },
        None => None,
    };

    let role = match org {
        // Role lookups only run against a real org; failures are fatal, not
        // treated as "no access".
        Some(ref org) => match RoleResolver::new(state.members.clone()).resolve(org.id, &viewer) {
            Ok(role) => role,
            Err(e) => return errors::domain_error_to_response(e),
        },
        None => OrgRole::None,
    };

    match evaluate(state.min_role, &viewer, org.as_ref(), role) {
        GateDecision::Allow { role } => {
            // evaluate only allows with a present, active org
            let Some(org) = org else {
                return errors::concealed_not_found();
            };
            req.extensions_mut().insert(OrgContext::new(org, role));
            next.run(req).await
        }
        GateDecision::Conceal => errors::concealed_not_found(),
    }
}
