//! Repository for the `donations` table.

use qrkot_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::donation::{CreateDonation, Donation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, comment, full_amount, invested_amount, \
                       fully_invested, create_date, close_date";

/// Provides insert, listing and open-pool queries for donations.
pub struct DonationRepo;

impl DonationRepo {
    /// Insert a new, unallocated donation owned by `user_id`.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        input: &CreateDonation,
    ) -> Result<Donation, sqlx::Error> {
        let query = format!(
            "INSERT INTO donations (user_id, comment, full_amount)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(user_id)
            .bind(&input.comment)
            .bind(input.full_amount)
            .fetch_one(conn)
            .await
    }

    /// Find a donation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List donations ordered by ID. A `None` limit returns every row.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM donations ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Donation>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List one user's donations ordered by ID.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE user_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Donation>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All open donations, oldest first, ties broken by ID.
    ///
    /// Rows are locked `FOR UPDATE`; call inside the allocation transaction.
    pub async fn list_open(conn: &mut PgConnection) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations
             WHERE fully_invested = FALSE
             ORDER BY create_date ASC, id ASC
             FOR UPDATE"
        );
        sqlx::query_as::<_, Donation>(&query).fetch_all(conn).await
    }

    /// Persist the funding state written by an allocation pass.
    pub async fn save_funding(conn: &mut PgConnection, donation: &Donation) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE donations SET
                invested_amount = $2,
                fully_invested = $3,
                close_date = $4
             WHERE id = $1",
        )
        .bind(donation.id)
        .bind(donation.invested_amount)
        .bind(donation.fully_invested)
        .bind(donation.close_date)
        .execute(conn)
        .await?;
        Ok(())
    }
}
