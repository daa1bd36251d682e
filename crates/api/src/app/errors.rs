use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use congregate_core::DomainError;

/// The single uniform response for every concealed outcome.
///
/// Byte-for-byte identical regardless of the underlying reason (nonexistent
/// org, wrong role, unauthenticated): an attacker probing an org-admin route
/// learns nothing from the body.
pub const CONCEALED_BODY: &str = r#"{"error":"not_found","message":"not found"}"#;

pub fn concealed_not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        CONCEALED_BODY,
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Map a domain error to its HTTP shape.
///
/// Concealment applies to authorization facts; validation facts for an
/// already-authorized caller get structured 400s. Persistence failures are
/// fatal (500) and never downgraded to "no access".
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvalidState(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_state", msg),
        DomainError::Conflict(msg) => json_error(StatusCode::BAD_REQUEST, "conflict", msg),
        DomainError::NotFound => concealed_not_found(),
        DomainError::Unauthorized => concealed_not_found(),
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}
