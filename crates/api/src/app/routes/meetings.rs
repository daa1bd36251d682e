//! Leadership routes for pastoral meeting requests.
//!
//! Behind the moderator concealment gate; the whole surface additionally
//! conceals when the org lacks the pastoral appointments feature (handled
//! inside the workflow engine).

use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::response::Response;
use chrono::Utc;

use congregate_core::{MeetingRequestId, OrgId};

use crate::app::dto::MeetingRequestView;
use crate::app::errors;
use crate::app::routes::{ok_json, require_user};
use crate::app::services::AppServices;
use crate::context::{OrgContext, ViewerContext};

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
) -> Response {
    match services.meetings.list(ctx.organization().id) {
        Ok(rows) => ok_json(rows.into_iter().map(MeetingRequestView::from).collect::<Vec<_>>()),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Advance a meeting request one step forward in its lifecycle.
pub async fn transition(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
    Extension(viewer): Extension<ViewerContext>,
    Path((_org, id)): Path<(OrgId, MeetingRequestId)>,
) -> Response {
    let actor = match require_user(&viewer) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    match services
        .meetings
        .advance(ctx.organization().id, id, actor, Utc::now())
    {
        Ok(request) => ok_json(MeetingRequestView::from(request)),
        Err(e) => errors::domain_error_to_response(e),
    }
}
