//! Handlers for the `/charity-projects` resource.
//!
//! Reads are public. Writes require a superuser and go through the
//! transactional cycles in [`crate::investment`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use qrkot_core::error::CoreError;
use qrkot_core::types::DbId;
use qrkot_db::models::charity_project::{
    CharityProject, CreateCharityProject, UpdateCharityProject,
};
use qrkot_db::repositories::CharityProjectRepo;

use crate::error::{AppError, AppResult};
use crate::investment;
use crate::middleware::json::ApiJson;
use crate::middleware::rbac::RequireSuperuser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// GET /api/v1/charity-projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<CharityProject>>> {
    let (limit, offset) = params.window();
    let projects = CharityProjectRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(projects))
}

/// GET /api/v1/charity-projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CharityProject>> {
    let project = CharityProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CharityProject",
            id,
        }))?;
    Ok(Json(project))
}

/// POST /api/v1/charity-projects
pub async fn create(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateCharityProject>,
) -> AppResult<(StatusCode, Json<CharityProject>)> {
    let project = investment::create_project_and_invest(&state.pool, &input).await?;
    tracing::debug!(project_id = project.id, admin_id = admin.user_id, "Project created via API");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PATCH /api/v1/charity-projects/{id}
pub async fn update(
    RequireSuperuser(_admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateCharityProject>,
) -> AppResult<Json<CharityProject>> {
    let project = investment::update_project(&state.pool, id, &input).await?;
    Ok(Json(project))
}

/// DELETE /api/v1/charity-projects/{id}
///
/// Responds with the deleted project.
pub async fn delete(
    RequireSuperuser(_admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CharityProject>> {
    let project = investment::delete_project(&state.pool, id).await?;
    Ok(Json(project))
}
