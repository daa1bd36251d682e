//! Router assembly.

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::routing::{delete, get, patch, post};
use axum::{Extension, Router, middleware};

use congregate_auth::Hs256JwtValidator;
use congregate_gating::{ADMIN_MIN_ROLE, MODERATOR_MIN_ROLE};

use crate::gates::{GateState, concealment_gate};
use crate::middleware::{AuthState, viewer_middleware};
use services::{AppServices, default_policy_table};

/// Default in-memory wiring.
pub fn build_app(jwt_secret: &[u8]) -> Router {
    build_app_with(AppServices::in_memory(default_policy_table()), jwt_secret)
}

/// Assemble the router over an explicit service wiring; tests use this to
/// seed organizations and memberships before issuing requests.
pub fn build_app_with(services: Arc<AppServices>, jwt_secret: &[u8]) -> Router {
    let auth = AuthState {
        jwt: Arc::new(Hs256JwtValidator::new(jwt_secret.to_vec())),
    };
    let admin_gate = GateState {
        orgs: services.directory.clone(),
        members: services.directory.clone(),
        min_role: ADMIN_MIN_ROLE,
    };
    let moderator_gate = GateState {
        orgs: services.directory.clone(),
        members: services.directory.clone(),
        min_role: MODERATOR_MIN_ROLE,
    };

    let public = Router::new()
        .route("/health", get(routes::system::health))
        .route("/orgs/:slug", get(routes::public::org_profile))
        .route("/orgs/:slug/sermons", get(routes::public::sermons))
        .route("/orgs/:slug/leaders", get(routes::public::leaders))
        .route("/orgs/:slug/events", get(routes::public::events))
        .route("/orgs/:slug/posts", get(routes::public::posts))
        .route(
            "/orgs/:slug/membership-requests",
            post(routes::public::submit_membership_request),
        )
        .route(
            "/orgs/:slug/ordination-programs",
            get(routes::public::ordination_programs),
        )
        .route(
            "/ordination-programs/:id/applications",
            post(routes::public::submit_application),
        )
        .route(
            "/me/ordination-applications",
            get(routes::public::my_applications),
        )
        .route(
            "/orgs/:slug/meeting-requests",
            post(routes::public::create_meeting_request),
        );

    let admin = Router::new()
        .route("/membership-requests", get(routes::membership::list_requests))
        .route(
            "/membership-requests/:id/approve",
            post(routes::membership::approve),
        )
        .route(
            "/membership-requests/:id/decline",
            post(routes::membership::decline),
        )
        .route("/members", get(routes::membership::list_members))
        .route(
            "/members/:user_id/role",
            patch(routes::membership::change_role),
        )
        .route("/members/:user_id", delete(routes::membership::remove_member))
        .route(
            "/ordination-programs",
            post(routes::ordination::create_program).get(routes::ordination::list_programs),
        )
        .route(
            "/ordination-programs/:id",
            patch(routes::ordination::update_program),
        )
        .route(
            "/ordination-applications",
            get(routes::ordination::list_applications),
        )
        .route(
            "/ordination-applications/:id/begin",
            post(routes::ordination::begin_review),
        )
        .route(
            "/ordination-applications/:id/reviews",
            post(routes::ordination::post_review).get(routes::ordination::list_reviews),
        )
        .route("/activity", get(routes::membership::activity))
        .route_layer(middleware::from_fn_with_state(admin_gate, concealment_gate));

    let leader = Router::new()
        .route("/meeting-requests", get(routes::meetings::list))
        .route(
            "/meeting-requests/:id/transition",
            post(routes::meetings::transition),
        )
        .route_layer(middleware::from_fn_with_state(
            moderator_gate,
            concealment_gate,
        ));

    Router::new()
        .merge(public)
        .nest("/org-admin/:org", admin)
        .nest("/org-leader/:org", leader)
        .layer(Extension(services))
        .layer(middleware::from_fn_with_state(auth, viewer_middleware))
}
