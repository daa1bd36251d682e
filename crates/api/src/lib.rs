//! `congregate-api` — HTTP layer.
//!
//! Auth middleware resolves the viewer; concealment gates guard the
//! `/org-admin` and `/org-leader` surfaces; handlers delegate to the
//! workflow engines and map domain errors to the wire contract.

pub mod app;
pub mod context;
pub mod gates;
pub mod middleware;

pub use app::errors::CONCEALED_BODY;
pub use app::services::{AppServices, default_policy_table};
pub use app::{build_app, build_app_with};
pub use context::{OrgContext, ViewerContext};
