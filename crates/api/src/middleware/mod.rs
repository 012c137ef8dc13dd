//! Request extractors.
//!
//! - [`auth::AuthUser`] -- The active user behind a JWT Bearer token.
//! - [`rbac::RequireSuperuser`] -- Requires the superuser flag.
//! - [`json::ApiJson`] -- JSON bodies with `AppError` rejections.

pub mod auth;
pub mod json;
pub mod rbac;
