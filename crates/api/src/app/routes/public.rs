//! Public, viewer-optional routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query};
use axum::response::Response;
use chrono::Utc;
use serde::Deserialize;

use congregate_core::ProgramId;
use congregate_entitlements::features;
use congregate_projection::project;

use crate::app::dto::{
    ApplicationView, MeetingRequestBody, MembershipRequestBody, OrgProfileResponse, ProgramView,
    SubmitApplicationBody,
};
use crate::app::errors;
use crate::app::routes::{active_org_by_slug, created_json, ensure_feature, ok_json, require_user};
use crate::app::services::AppServices;
use crate::context::ViewerContext;

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    pub affiliated: bool,
}

/// Public organization profile: the projected view plus the viewer's
/// capabilities. `?affiliated=true` marks a claimed affiliation, an input to
/// the capability computation rather than a stored fact.
pub async fn org_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(slug): Path<String>,
    Query(query): Query<ProfileQuery>,
) -> Response {
    let org = match active_org_by_slug(&services, &slug) {
        Ok(org) => org,
        Err(resp) => return resp,
    };

    let wanted = [
        features::ORG_SERMONS,
        features::ORG_ORDINATIONS,
        features::ORG_LEADERS,
        features::ORG_EVENTS,
        features::ORG_POSTS,
        features::ORG_PASTORAL_APPOINTMENTS,
        features::VIEWER_ADS_REQUIRED,
    ];
    let capabilities =
        match services
            .capabilities
            .compute(&org, &viewer.viewer(), query.affiliated, &wanted)
        {
            Ok(caps) => caps,
            Err(e) => return errors::domain_error_to_response(e),
        };

    ok_json(OrgProfileResponse {
        organization: project(&org),
        capabilities,
    })
}

macro_rules! content_list_route {
    ($name:ident, $feature:expr, $list:ident) => {
        pub async fn $name(
            Extension(services): Extension<Arc<AppServices>>,
            Path(slug): Path<String>,
        ) -> Response {
            let org = match active_org_by_slug(&services, &slug) {
                Ok(org) => org,
                Err(resp) => return resp,
            };
            if let Err(resp) = ensure_feature(&services, &org, &$feature) {
                return resp;
            }
            match services.content.$list(org.id) {
                Ok(rows) => ok_json(rows.iter().map(project).collect::<Vec<_>>()),
                Err(e) => errors::domain_error_to_response(e),
            }
        }
    };
}

content_list_route!(sermons, features::ORG_SERMONS, sermons);
content_list_route!(leaders, features::ORG_LEADERS, leaders);
content_list_route!(events, features::ORG_EVENTS, events);
content_list_route!(posts, features::ORG_POSTS, posts);

/// Submit a membership request to an organization.
pub async fn submit_membership_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(slug): Path<String>,
    Json(body): Json<MembershipRequestBody>,
) -> Response {
    let user_id = match require_user(&viewer) {
        Ok(user_id) => user_id,
        Err(resp) => return resp,
    };
    let org = match active_org_by_slug(&services, &slug) {
        Ok(org) => org,
        Err(resp) => return resp,
    };
    let role = match services.roles.resolve(org.id, &viewer.viewer()) {
        Ok(role) => role,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .membership
        .submit(&org, user_id, role, body.notes, Utc::now())
    {
        Ok(request) => created_json(crate::app::dto::MembershipRequestView::from(request)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Enabled ordination programs of an organization.
pub async fn ordination_programs(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> Response {
    let org = match active_org_by_slug(&services, &slug) {
        Ok(org) => org,
        Err(resp) => return resp,
    };
    if let Err(resp) = ensure_feature(&services, &org, &features::ORG_ORDINATIONS) {
        return resp;
    }
    match services.ordination.programs(org.id) {
        Ok(programs) => ok_json(
            programs
                .into_iter()
                .filter(|p| p.enabled)
                .map(ProgramView::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Apply to an ordination program. The engine snapshots the program's form
/// schema and conceals programs of orgs without the ordinations feature.
pub async fn submit_application(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(program_id): Path<ProgramId>,
    Json(body): Json<SubmitApplicationBody>,
) -> Response {
    let user_id = match require_user(&viewer) {
        Ok(user_id) => user_id,
        Err(resp) => return resp,
    };

    match services
        .ordination
        .submit_application(program_id, user_id, body.answers, Utc::now())
    {
        Ok(application) => created_json(ApplicationView::from(application)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// The caller's own ordination applications.
pub async fn my_applications(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
) -> Response {
    let user_id = match require_user(&viewer) {
        Ok(user_id) => user_id,
        Err(resp) => return resp,
    };

    match services.ordination.applications_for_user(user_id) {
        Ok(applications) => ok_json(
            applications
                .into_iter()
                .map(ApplicationView::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Request a pastoral meeting. The engine conceals the whole surface when
/// the org lacks the pastoral appointments feature.
pub async fn create_meeting_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(slug): Path<String>,
    Json(body): Json<MeetingRequestBody>,
) -> Response {
    let user_id = match require_user(&viewer) {
        Ok(user_id) => user_id,
        Err(resp) => return resp,
    };
    let org = match active_org_by_slug(&services, &slug) {
        Ok(org) => org,
        Err(resp) => return resp,
    };

    match services.meetings.create(&org, user_id, body.topic, Utc::now()) {
        Ok(request) => created_json(crate::app::dto::MeetingRequestView::from(request)),
        Err(e) => errors::domain_error_to_response(e),
    }
}
