//! Handlers for the `/donations` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use qrkot_db::models::donation::{CreateDonation, Donation, DonationResponse};
use qrkot_db::repositories::DonationRepo;

use crate::error::AppResult;
use crate::investment;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ApiJson;
use crate::middleware::rbac::RequireSuperuser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /api/v1/donations
///
/// The donor sees the public view only; allocation details stay private.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateDonation>,
) -> AppResult<(StatusCode, Json<DonationResponse>)> {
    let donation = investment::create_donation_and_invest(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DonationResponse::from(donation))))
}

/// GET /api/v1/donations/my
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DonationResponse>>> {
    let donations = DonationRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(donations.into_iter().map(DonationResponse::from).collect()))
}

/// GET /api/v1/donations
///
/// Full view including allocation state. Superuser only.
pub async fn list_all(
    RequireSuperuser(_admin): RequireSuperuser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Donation>>> {
    let (limit, offset) = params.window();
    let donations = DonationRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(donations))
}
