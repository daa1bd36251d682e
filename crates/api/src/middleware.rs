use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use congregate_auth::{JwtValidator, Viewer};

use crate::context::ViewerContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Resolve the viewer identity for every request.
///
/// A missing Authorization header is a legitimate anonymous viewer — public
/// routes serve those, and the concealment gates handle the rest. A header
/// that is present but invalid is a 401: that says nothing about any
/// organization, so it leaks no gated fact.
pub async fn viewer_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let viewer = match bearer_token(req.headers()) {
        None => Viewer::Anonymous,
        Some(token) => {
            let claims = state
                .jwt
                .validate(token, Utc::now())
                .map_err(|_e| StatusCode::UNAUTHORIZED)?;
            Viewer::authenticated(claims.sub)
        }
    };

    req.extensions_mut().insert(ViewerContext::new(viewer));
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
