//! Business rules for editing and deleting charity projects.
//!
//! These guards run before any write and share the closing rule of the
//! allocator: lowering a project's target to its committed funds closes
//! it with a fresh, second-truncated `close_date`.

use crate::error::CoreError;
use crate::fundable::{Fundable, Retargetable};
use crate::types::{Amount, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum accepted password length for registered users.
pub const MIN_PASSWORD_LEN: usize = 3;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject empty or whitespace-only required text.
pub fn validate_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Reject a non-positive target amount.
pub fn validate_full_amount(full_amount: Amount) -> Result<(), CoreError> {
    if full_amount <= 0 {
        return Err(CoreError::Validation(format!(
            "full_amount must be positive, got {full_amount}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// A closed project cannot be edited.
pub fn ensure_editable<F: Fundable + ?Sized>(project: &F) -> Result<(), CoreError> {
    if project.fully_invested() {
        return Err(CoreError::State("Closed project can't be edited".into()));
    }
    Ok(())
}

/// Only a project that never received funds and is still open may be deleted.
pub fn ensure_deletable<F: Fundable + ?Sized>(project: &F) -> Result<(), CoreError> {
    if project.fully_invested() || project.invested_amount() > 0 {
        return Err(CoreError::State(
            "Can't delete a project that has received funds or is closed".into(),
        ));
    }
    Ok(())
}

/// Change a project's target amount.
///
/// Fails with [`CoreError::Validation`] for a non-positive value and with
/// [`CoreError::Conflict`] when the value is below the funds already
/// invested. When the new target is met by the invested amount, the
/// project is closed at `now`.
pub fn retarget<F: Retargetable + ?Sized>(
    project: &mut F,
    new_full_amount: Amount,
    now: Timestamp,
) -> Result<(), CoreError> {
    validate_full_amount(new_full_amount)?;

    let invested = project.invested_amount();
    if new_full_amount < invested {
        return Err(CoreError::Conflict(format!(
            "full_amount ({new_full_amount}) can't be less than invested_amount ({invested})"
        )));
    }

    project.set_full_amount(new_full_amount);
    if project.invested_amount() >= project.full_amount() {
        project.close_at(now);
    }
    Ok(())
}
