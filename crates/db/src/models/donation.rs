//! Donation entity model and DTOs.
//!
//! Donations have no update DTO: after creation only the allocator
//! changes them.

use qrkot_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `donations` table.
///
/// Serializes in full; this is the superuser view. Donors see
/// [`DonationResponse`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: DbId,
    pub user_id: DbId,
    pub comment: Option<String>,
    pub full_amount: Amount,
    pub invested_amount: Amount,
    pub fully_invested: bool,
    pub create_date: Timestamp,
    pub close_date: Option<Timestamp>,
}

impl_fundable!(Donation);

/// Donor-facing view of a donation (no allocation details).
#[derive(Debug, Clone, Serialize)]
pub struct DonationResponse {
    pub id: DbId,
    pub full_amount: Amount,
    pub comment: Option<String>,
    pub create_date: Timestamp,
}

impl From<Donation> for DonationResponse {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id,
            full_amount: donation.full_amount,
            comment: donation.comment,
            create_date: donation.create_date,
        }
    }
}

/// DTO for creating a donation. The owning user comes from the caller's identity.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateDonation {
    #[validate(range(min = 1))]
    pub full_amount: Amount,
    pub comment: Option<String>,
}
