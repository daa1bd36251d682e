//! Admin routes for ordination programs, applications, and reviews.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path};
use axum::response::Response;
use chrono::Utc;

use congregate_core::{ApplicationId, OrgId, ProgramId};

use crate::app::dto::{
    ApplicationView, CreateProgramBody, ProgramView, ReviewBody, ReviewView, UpdateProgramBody,
};
use crate::app::errors;
use crate::app::routes::{created_json, ok_json, require_user};
use crate::app::services::AppServices;
use crate::context::{OrgContext, ViewerContext};

pub async fn create_program(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
    Extension(viewer): Extension<ViewerContext>,
    Json(body): Json<CreateProgramBody>,
) -> Response {
    let actor = match require_user(&viewer) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    match services.ordination.create_program(
        ctx.organization(),
        body.title,
        body.form_schema,
        actor,
        Utc::now(),
    ) {
        Ok(program) => created_json(ProgramView::from(program)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// All programs of the org, disabled ones included.
pub async fn list_programs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
) -> Response {
    match services.ordination.programs(ctx.organization().id) {
        Ok(programs) => ok_json(programs.into_iter().map(ProgramView::from).collect::<Vec<_>>()),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_program(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
    Extension(viewer): Extension<ViewerContext>,
    Path((_org, id)): Path<(OrgId, ProgramId)>,
    Json(body): Json<UpdateProgramBody>,
) -> Response {
    let actor = match require_user(&viewer) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    match services.ordination.update_program(
        ctx.organization().id,
        id,
        body.title,
        body.form_schema,
        body.enabled,
        actor,
        Utc::now(),
    ) {
        Ok(program) => ok_json(ProgramView::from(program)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_applications(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
) -> Response {
    match services.ordination.applications_for_org(ctx.organization().id) {
        Ok(applications) => ok_json(
            applications
                .into_iter()
                .map(ApplicationView::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Claim a pending application for review.
pub async fn begin_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
    Extension(viewer): Extension<ViewerContext>,
    Path((_org, id)): Path<(OrgId, ApplicationId)>,
) -> Response {
    let reviewer = match require_user(&viewer) {
        Ok(reviewer) => reviewer,
        Err(resp) => return resp,
    };
    match services
        .ordination
        .begin_review(ctx.organization().id, id, reviewer, Utc::now())
    {
        Ok(application) => ok_json(ApplicationView::from(application)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn post_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
    Extension(viewer): Extension<ViewerContext>,
    Path((_org, id)): Path<(OrgId, ApplicationId)>,
    Json(body): Json<ReviewBody>,
) -> Response {
    let reviewer = match require_user(&viewer) {
        Ok(reviewer) => reviewer,
        Err(resp) => return resp,
    };
    match services.ordination.append_review(
        ctx.organization().id,
        id,
        reviewer,
        body.decision,
        body.notes,
        Utc::now(),
    ) {
        Ok(review) => created_json(ReviewView::from(review)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Reviews of one application, in submission order.
pub async fn list_reviews(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<OrgContext>,
    Path((_org, id)): Path<(OrgId, ApplicationId)>,
) -> Response {
    match services.ordination.reviews(ctx.organization().id, id) {
        Ok(reviews) => ok_json(reviews.into_iter().map(ReviewView::from).collect::<Vec<_>>()),
        Err(e) => errors::domain_error_to_response(e),
    }
}
