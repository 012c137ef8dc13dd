//! Integration tests for the ledger repositories.
//!
//! Exercises the open-pool query contract, the at-rest check constraints,
//! and a full allocation pass persisted through the repositories.

use qrkot_core::allocation::allocate;
use qrkot_core::types::{now_truncated, DbId};
use qrkot_db::ledger::{acquire_ledger_lock, LEDGER_LOCK_KEY};
use qrkot_db::models::charity_project::CreateCharityProject;
use qrkot_db::models::donation::CreateDonation;
use qrkot_db::models::user::CreateUser;
use qrkot_db::repositories::{CharityProjectRepo, DonationRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_donor(pool: &PgPool, email: &str) -> DbId {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        is_superuser: false,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

async fn insert_donation(pool: &PgPool, user_id: DbId, amount: i64) -> DbId {
    let mut conn = pool.acquire().await.unwrap();
    let input = CreateDonation {
        full_amount: amount,
        comment: None,
    };
    DonationRepo::create(&mut *conn, user_id, &input)
        .await
        .unwrap()
        .id
}

async fn insert_project(pool: &PgPool, name: &str, amount: i64) -> DbId {
    let mut conn = pool.acquire().await.unwrap();
    let input = CreateCharityProject {
        name: name.to_string(),
        description: format!("{name} description"),
        full_amount: amount,
    };
    CharityProjectRepo::create(&mut *conn, &input)
        .await
        .unwrap()
        .id
}

async fn set_create_date(pool: &PgPool, table: &str, id: DbId, ts: &str) {
    sqlx::query(&format!(
        "UPDATE {table} SET create_date = $2::TIMESTAMPTZ WHERE id = $1"
    ))
    .bind(id)
    .bind(ts)
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Open-pool query contract
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_open_donations_ordered_by_create_date_then_id(pool: PgPool) {
    let user = create_donor(&pool, "donor@test.com").await;
    let a = insert_donation(&pool, user, 100).await;
    let b = insert_donation(&pool, user, 100).await;
    let c = insert_donation(&pool, user, 100).await;

    // c is the oldest; a and b share a timestamp and fall back to id order.
    set_create_date(&pool, "donations", c, "2026-01-01T08:00:00Z").await;
    set_create_date(&pool, "donations", a, "2026-01-01T09:00:00Z").await;
    set_create_date(&pool, "donations", b, "2026-01-01T09:00:00Z").await;

    let mut conn = pool.acquire().await.unwrap();
    let open = DonationRepo::list_open(&mut *conn).await.unwrap();
    let ids: Vec<DbId> = open.iter().map(|d| d.id).collect();

    assert_eq!(ids, vec![c, a, b]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_open_projects_exclude_closed(pool: PgPool) {
    let open_id = insert_project(&pool, "Open", 500).await;
    let closed_id = insert_project(&pool, "Closed", 200).await;

    sqlx::query(
        "UPDATE charity_projects
         SET invested_amount = full_amount, fully_invested = TRUE, close_date = NOW()
         WHERE id = $1",
    )
    .bind(closed_id)
    .execute(&pool)
    .await
    .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let open = CharityProjectRepo::list_open(&mut *conn).await.unwrap();
    let ids: Vec<DbId> = open.iter().map(|p| p.id).collect();

    assert_eq!(ids, vec![open_id]);
}

// ---------------------------------------------------------------------------
// At-rest invariants
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_over_investment_is_rejected(pool: PgPool) {
    let id = insert_project(&pool, "Capped", 100).await;

    let result = sqlx::query("UPDATE charity_projects SET invested_amount = 101 WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await;

    assert!(result.is_err(), "invested_amount above full_amount must fail");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_closed_flag_requires_close_date(pool: PgPool) {
    let user = create_donor(&pool, "flag@test.com").await;
    let id = insert_donation(&pool, user, 100).await;

    let result = sqlx::query(
        "UPDATE donations SET invested_amount = 100, fully_invested = TRUE WHERE id = $1",
    )
    .bind(id)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "fully_invested without close_date must fail");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_project_name_hits_unique_constraint(pool: PgPool) {
    insert_project(&pool, "Shelter", 100).await;

    let mut conn = pool.acquire().await.unwrap();
    assert!(CharityProjectRepo::name_taken(&mut *conn, "Shelter", None)
        .await
        .unwrap());

    let input = CreateCharityProject {
        name: "Shelter".to_string(),
        description: "again".to_string(),
        full_amount: 100,
    };
    let err = CharityProjectRepo::create(&mut *conn, &input)
        .await
        .expect_err("duplicate name must fail");
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("uq_charity_projects_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_name_taken_ignores_excluded_project(pool: PgPool) {
    let id = insert_project(&pool, "Solo", 100).await;

    let mut conn = pool.acquire().await.unwrap();
    let taken = CharityProjectRepo::name_taken(&mut *conn, "Solo", Some(id))
        .await
        .unwrap();

    assert!(!taken);
}

// ---------------------------------------------------------------------------
// Allocation pass persisted through the repositories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_allocation_pass_persists_subject_and_touched_pool(pool: PgPool) {
    let p1 = insert_project(&pool, "First", 200).await;
    let p2 = insert_project(&pool, "Second", 500).await;
    set_create_date(&pool, "charity_projects", p1, "2026-01-01T08:00:00Z").await;
    set_create_date(&pool, "charity_projects", p2, "2026-01-01T09:00:00Z").await;
    let user = create_donor(&pool, "alloc@test.com").await;

    let mut tx = pool.begin().await.unwrap();
    acquire_ledger_lock(&mut *tx).await.unwrap();

    let input = CreateDonation {
        full_amount: 300,
        comment: Some("for the cats".to_string()),
    };
    let mut donation = DonationRepo::create(&mut *tx, user, &input).await.unwrap();
    let mut projects = CharityProjectRepo::list_open(&mut *tx).await.unwrap();

    let outcome = allocate(&mut donation, &mut projects, now_truncated());
    DonationRepo::save_funding(&mut *tx, &donation).await.unwrap();
    for &index in &outcome.touched {
        CharityProjectRepo::save_funding(&mut *tx, &projects[index])
            .await
            .unwrap();
    }
    tx.commit().await.unwrap();

    let first = CharityProjectRepo::find_by_id(&pool, p1).await.unwrap().unwrap();
    let second = CharityProjectRepo::find_by_id(&pool, p2).await.unwrap().unwrap();
    let stored = DonationRepo::find_by_id(&pool, donation.id).await.unwrap().unwrap();

    assert_eq!(first.invested_amount, 200);
    assert!(first.fully_invested);
    assert!(first.close_date.is_some());
    assert_eq!(second.invested_amount, 100);
    assert!(!second.fully_invested);
    assert_eq!(stored.invested_amount, 300);
    assert!(stored.fully_invested);
    assert_eq!(stored.comment.as_deref(), Some("for the cats"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rolled_back_pass_leaves_no_trace(pool: PgPool) {
    let user = create_donor(&pool, "rollback@test.com").await;
    let donation_id = insert_donation(&pool, user, 100).await;

    {
        let mut tx = pool.begin().await.unwrap();
        acquire_ledger_lock(&mut *tx).await.unwrap();
        let input = CreateCharityProject {
            name: "Ephemeral".to_string(),
            description: "never committed".to_string(),
            full_amount: 100,
        };
        let mut project = CharityProjectRepo::create(&mut *tx, &input).await.unwrap();
        let mut donations = DonationRepo::list_open(&mut *tx).await.unwrap();
        let outcome = allocate(&mut project, &mut donations, now_truncated());
        for &index in &outcome.touched {
            DonationRepo::save_funding(&mut *tx, &donations[index])
                .await
                .unwrap();
        }
        // Dropped without commit.
    }

    let donation = DonationRepo::find_by_id(&pool, donation_id).await.unwrap().unwrap();
    assert_eq!(donation.invested_amount, 0);
    assert!(!donation.fully_invested);
    assert!(CharityProjectRepo::find_by_name(&pool, "Ephemeral")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Ledger lock
// ---------------------------------------------------------------------------

async fn try_ledger_lock(conn: &mut sqlx::PgConnection) -> bool {
    let row: (bool,) = sqlx::query_as("SELECT pg_try_advisory_xact_lock($1)")
        .bind(LEDGER_LOCK_KEY)
        .fetch_one(conn)
        .await
        .unwrap();
    row.0
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ledger_lock_is_exclusive_until_commit(pool: PgPool) {
    let mut holder = pool.begin().await.unwrap();
    acquire_ledger_lock(&mut *holder).await.unwrap();

    let mut contender = pool.begin().await.unwrap();
    assert!(
        !try_ledger_lock(&mut *contender).await,
        "a second transaction must not get the lock while it is held"
    );
    contender.rollback().await.unwrap();

    holder.commit().await.unwrap();

    let mut after = pool.begin().await.unwrap();
    assert!(try_ledger_lock(&mut *after).await, "commit must release the lock");
    after.rollback().await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ledger_lock_released_on_rollback(pool: PgPool) {
    let mut failed = pool.begin().await.unwrap();
    acquire_ledger_lock(&mut *failed).await.unwrap();
    failed.rollback().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    assert!(try_ledger_lock(&mut *tx).await, "rollback must release the lock");
}
