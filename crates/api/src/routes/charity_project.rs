//! Route definitions for the `/charity-projects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::charity_project;
use crate::state::AppState;

/// Routes mounted at `/charity-projects`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create (superuser)
/// GET    /{id}  -> get_by_id
/// PATCH  /{id}  -> update (superuser)
/// DELETE /{id}  -> delete (superuser)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(charity_project::list).post(charity_project::create))
        .route(
            "/{id}",
            get(charity_project::get_by_id)
                .patch(charity_project::update)
                .delete(charity_project::delete),
        )
}
