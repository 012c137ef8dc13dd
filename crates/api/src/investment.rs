//! Read-match-write cycles over the donation ledger.
//!
//! Every function here runs inside a single transaction holding the ledger
//! lock: fetch the open pool, run the pure allocator from `qrkot_core`,
//! persist the subject and every touched pool entry, commit. An early
//! return drops the transaction, which rolls back every write and releases
//! the lock, so no partial allocation is ever visible.

use qrkot_core::allocation::allocate;
use qrkot_core::charity_project::{ensure_deletable, ensure_editable, retarget, validate_text};
use qrkot_core::error::CoreError;
use qrkot_core::types::{now_truncated, DbId};
use qrkot_db::ledger::acquire_ledger_lock;
use qrkot_db::models::charity_project::{
    CharityProject, CreateCharityProject, UpdateCharityProject,
};
use qrkot_db::models::donation::{CreateDonation, Donation};
use qrkot_db::repositories::{CharityProjectRepo, DonationRepo};
use qrkot_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};

fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "CharityProject",
        id,
    })
}

fn name_conflict(name: &str) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Charity project name '{name}' is already taken"
    )))
}

/// Create a charity project and fund it from open donations, oldest first.
pub async fn create_project_and_invest(
    pool: &DbPool,
    input: &CreateCharityProject,
) -> AppResult<CharityProject> {
    input.validate()?;
    validate_text("name", &input.name)?;
    validate_text("description", &input.description)?;

    let mut tx = pool.begin().await?;
    acquire_ledger_lock(&mut *tx).await?;

    if CharityProjectRepo::name_taken(&mut *tx, &input.name, None).await? {
        return Err(name_conflict(&input.name));
    }

    let mut project = CharityProjectRepo::create(&mut *tx, input).await?;
    let mut donations = DonationRepo::list_open(&mut *tx).await?;
    let outcome = allocate(&mut project, &mut donations, now_truncated());

    if !outcome.is_noop() {
        CharityProjectRepo::save_funding(&mut *tx, &project).await?;
        for &index in &outcome.touched {
            DonationRepo::save_funding(&mut *tx, &donations[index]).await?;
        }
    }
    tx.commit().await?;

    tracing::info!(
        project_id = project.id,
        transferred = outcome.transferred,
        donations_touched = outcome.touched.len(),
        closed = outcome.subject_closed,
        "Charity project created and funded",
    );
    Ok(project)
}

/// Record a donation for `user_id` and spread it across open projects,
/// oldest first.
pub async fn create_donation_and_invest(
    pool: &DbPool,
    user_id: DbId,
    input: &CreateDonation,
) -> AppResult<Donation> {
    input.validate()?;

    let mut tx = pool.begin().await?;
    acquire_ledger_lock(&mut *tx).await?;

    let mut donation = DonationRepo::create(&mut *tx, user_id, input).await?;
    let mut projects = CharityProjectRepo::list_open(&mut *tx).await?;
    let outcome = allocate(&mut donation, &mut projects, now_truncated());

    if !outcome.is_noop() {
        DonationRepo::save_funding(&mut *tx, &donation).await?;
        for &index in &outcome.touched {
            CharityProjectRepo::save_funding(&mut *tx, &projects[index]).await?;
        }
    }
    tx.commit().await?;

    tracing::info!(
        donation_id = donation.id,
        user_id,
        transferred = outcome.transferred,
        projects_touched = outcome.touched.len(),
        closed = outcome.subject_closed,
        "Donation created and allocated",
    );
    Ok(donation)
}

/// Apply an admin edit to an open project.
///
/// Lowering `full_amount` to the invested amount closes the project.
/// The open pool is never consulted.
pub async fn update_project(
    pool: &DbPool,
    id: DbId,
    input: &UpdateCharityProject,
) -> AppResult<CharityProject> {
    input.validate()?;

    let mut tx = pool.begin().await?;
    acquire_ledger_lock(&mut *tx).await?;

    let mut project = CharityProjectRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    ensure_editable(&project)?;

    if let Some(name) = &input.name {
        validate_text("name", name)?;
        if CharityProjectRepo::name_taken(&mut *tx, name, Some(id)).await? {
            return Err(name_conflict(name));
        }
        project.name = name.clone();
    }

    if let Some(description) = &input.description {
        validate_text("description", description)?;
        project.description = description.clone();
    }

    if let Some(full_amount) = input.full_amount {
        retarget(&mut project, full_amount, now_truncated())?;
    }

    let project = CharityProjectRepo::save(&mut *tx, &project).await?;
    tx.commit().await?;

    tracing::info!(
        project_id = project.id,
        full_amount = project.full_amount,
        closed = project.fully_invested,
        "Charity project updated",
    );
    Ok(project)
}

/// Delete a project that has never received funds. Returns the deleted row.
pub async fn delete_project(pool: &DbPool, id: DbId) -> AppResult<CharityProject> {
    let mut tx = pool.begin().await?;
    acquire_ledger_lock(&mut *tx).await?;

    let project = CharityProjectRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    ensure_deletable(&project)?;

    if !CharityProjectRepo::delete(&mut *tx, id).await? {
        return Err(project_not_found(id));
    }
    tx.commit().await?;

    tracing::info!(project_id = id, "Charity project deleted");
    Ok(project)
}
