use chrono::SubsecRound;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Monetary amounts in whole currency units. No fractions.
pub type Amount = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Drop sub-second precision. Close dates are persisted at whole seconds.
pub fn truncate_to_seconds(ts: Timestamp) -> Timestamp {
    ts.trunc_subsecs(0)
}

/// Current wall-clock time truncated to whole seconds.
pub fn now_truncated() -> Timestamp {
    truncate_to_seconds(chrono::Utc::now())
}
