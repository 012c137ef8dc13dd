//! Single-writer discipline for the read-match-write allocation cycle.
//!
//! Every pass that reads the open pool, runs the allocator and writes the
//! results must hold the ledger lock for the whole transaction. Two passes
//! can then never read the same stale open set. Target edits on projects
//! take the same lock so they cannot interleave with an allocation.

use sqlx::PgConnection;

/// Advisory lock key reserved for the ledger ("QRKOT" in ASCII).
pub const LEDGER_LOCK_KEY: i64 = 0x51_524B_4F54;

/// Acquire the transaction-scoped ledger lock, waiting if another pass holds it.
///
/// Must be called on a connection inside an open transaction. PostgreSQL
/// releases the lock when that transaction commits or rolls back, so every
/// exit path (including an early `?` that drops the transaction) releases it.
pub async fn acquire_ledger_lock(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(LEDGER_LOCK_KEY)
        .execute(conn)
        .await?;
    tracing::debug!(key = LEDGER_LOCK_KEY, "Ledger lock acquired");
    Ok(())
}
