//! Admin routes: membership requests, member administration, activity.
//!
//! Every handler here runs behind the admin concealment gate, so `OrgContext`
//! is always present and the viewer is authenticated.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use congregate_core::{MembershipRequestId, OrgId, UserId};
use congregate_workflow::ActivityLog;

use crate::app::dto::{ActivityView, ChangeRoleBody, MemberView, MembershipRequestView};
use crate::app::errors;
use crate::app::routes::{ok_json, require_user};
use crate::app::services::AppServices;
use crate::context::{OrgContext, ViewerContext};

pub async fn list_requests(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
) -> Response {
    match services.membership.pending(ctx.organization().id) {
        Ok(rows) => ok_json(rows.into_iter().map(MembershipRequestView::from).collect::<Vec<_>>()),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn approve(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
    Extension(viewer): Extension<ViewerContext>,
    Path((_org, id)): Path<(OrgId, MembershipRequestId)>,
) -> Response {
    decide(&services, &ctx, &viewer, id, true)
}

pub async fn decline(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
    Extension(viewer): Extension<ViewerContext>,
    Path((_org, id)): Path<(OrgId, MembershipRequestId)>,
) -> Response {
    decide(&services, &ctx, &viewer, id, false)
}

fn decide(
    services: &Arc<AppServices>,
    ctx: &OrgContext,
    viewer: &ViewerContext,
    id: MembershipRequestId,
    approve: bool,
) -> Response {
    let actor = match require_user(viewer) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let org_id = ctx.organization().id;
    let outcome = if approve {
        services.membership.approve(org_id, id, actor, Utc::now())
    } else {
        services.membership.decline(org_id, id, actor, Utc::now())
    };
    match outcome {
        Ok(request) => ok_json(MembershipRequestView::from(request)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_members(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
) -> Response {
    match services.membership.members(ctx.organization().id) {
        Ok(rows) => ok_json(rows.into_iter().map(MemberView::from).collect::<Vec<_>>()),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn change_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
    Extension(viewer): Extension<ViewerContext>,
    Path((_org, target)): Path<(OrgId, UserId)>,
    Json(body): Json<ChangeRoleBody>,
) -> Response {
    let actor = match require_user(&viewer) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    match services.membership.change_role(
        ctx.organization().id,
        target,
        body.role,
        actor,
        ctx.role(),
        Utc::now(),
    ) {
        Ok(membership) => ok_json(MemberView::from(membership)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn remove_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
    Extension(viewer): Extension<ViewerContext>,
    Path((_org, target)): Path<(OrgId, UserId)>,
) -> Response {
    let actor = match require_user(&viewer) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    match services
        .membership
        .remove_member(ctx.organization().id, target, actor, Utc::now())
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn activity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
) -> Response {
    match services.activity.list(ctx.organization().id) {
        Ok(rows) => ok_json(rows.into_iter().map(ActivityView::from).collect::<Vec<_>>()),
        Err(e) => errors::domain_error_to_response(e),
    }
}
