//! Route definitions for the `/donations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::donation;
use crate::state::AppState;

/// Routes mounted at `/donations`.
///
/// ```text
/// GET  /    -> list_all (superuser)
/// POST /    -> create
/// GET  /my  -> list_mine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(donation::list_all).post(donation::create))
        .route("/my", get(donation::list_mine))
}
