//! Route handlers, grouped by audience.

pub mod meetings;
pub mod membership;
pub mod ordination;
pub mod public;
pub mod system;

use std::sync::Arc;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use congregate_core::UserId;
use congregate_entitlements::FeatureKey;
use congregate_gating::{Organization, OrganizationDirectory};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::ViewerContext;

pub(crate) fn ok_json<T: Serialize>(value: T) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

pub(crate) fn created_json<T: Serialize>(value: T) -> Response {
    (StatusCode::CREATED, Json(value)).into_response()
}

/// Routes that act on behalf of a user reject anonymous viewers with a plain
/// 401; that reveals nothing about any organization.
pub(crate) fn require_user(viewer: &ViewerContext) -> Result<UserId, Response> {
    viewer
        .viewer()
        .user_id()
        .ok_or_else(|| errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "authentication required"))
}

/// Resolve an active organization by slug. Unknown and soft-deleted slugs are
/// both the uniform concealed response.
pub(crate) fn active_org_by_slug(
    services: &Arc<AppServices>,
    slug: &str,
) -> Result<Organization, Response> {
    match services.directory.organization_by_slug(slug) {
        Ok(Some(org)) if org.is_active() => Ok(org),
        Ok(_) => Err(errors::concealed_not_found()),
        Err(e) => Err(errors::domain_error_to_response(e)),
    }
}

/// Feature-gate a route: an org without the flag conceals the whole surface.
pub(crate) fn ensure_feature(
    services: &Arc<AppServices>,
    org: &Organization,
    key: &FeatureKey,
) -> Result<(), Response> {
    match services.entitlements.has_feature(org.id, key) {
        Ok(true) => Ok(()),
        Ok(false) => Err(errors::concealed_not_found()),
        Err(e) => Err(errors::domain_error_to_response(e)),
    }
}
