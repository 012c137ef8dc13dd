//! Charity project entity model and DTOs.

use qrkot_core::fundable::Retargetable;
use qrkot_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `charity_projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharityProject {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub full_amount: Amount,
    pub invested_amount: Amount,
    pub fully_invested: bool,
    pub create_date: Timestamp,
    pub close_date: Option<Timestamp>,
}

impl_fundable!(CharityProject);

impl Retargetable for CharityProject {
    fn set_full_amount(&mut self, amount: Amount) {
        self.full_amount = amount;
    }
}

/// DTO for creating a new charity project.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCharityProject {
    /// Unique, at most 100 characters (the column is `VARCHAR(100)`).
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1))]
    pub full_amount: Amount,
}

/// DTO for editing a charity project. All fields are optional.
///
/// Funding fields other than the target are never client-editable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateCharityProject {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub full_amount: Option<Amount>,
}
