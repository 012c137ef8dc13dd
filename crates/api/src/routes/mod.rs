pub mod auth;
pub mod charity_project;
pub mod donation;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                register (public)
/// /auth/login                   login (public)
///
/// /charity-projects             list (public), create (superuser)
/// /charity-projects/{id}        get (public), update, delete (superuser)
///
/// /donations                    list all (superuser), create (user)
/// /donations/my                 caller's donations (user)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/charity-projects", charity_project::router())
        .nest("/donations", donation::router())
}
