//! The shared "fundable" shape of charity projects and donations.
//!
//! Both ledger entities carry the same funding state:
//! `{full_amount, invested_amount, fully_invested, close_date, create_date}`.
//! The allocator and the project guards are written once against
//! [`Fundable`] so the two entity kinds never need duplicated logic.
//!
//! Invariants every implementor must uphold at rest:
//!
//! - `0 <= invested_amount <= full_amount`
//! - `fully_invested` iff `close_date.is_some()` iff `invested_amount >= full_amount`

use crate::types::{truncate_to_seconds, Amount, Timestamp};

/// Read/write access to an entity's funding state.
pub trait Fundable {
    fn full_amount(&self) -> Amount;

    fn invested_amount(&self) -> Amount;

    fn set_invested_amount(&mut self, amount: Amount);

    fn fully_invested(&self) -> bool;

    fn close_date(&self) -> Option<Timestamp>;

    fn create_date(&self) -> Timestamp;

    /// Set `fully_invested = true` and `close_date = Some(at)` together.
    ///
    /// Implementors store the value as given; use [`Fundable::close_at`]
    /// which applies truncation and the set-once rule.
    fn set_closed(&mut self, at: Timestamp);

    /// Capacity left before the target is met. Zero or negative means none.
    fn remaining(&self) -> Amount {
        self.full_amount() - self.invested_amount()
    }

    fn is_open(&self) -> bool {
        !self.fully_invested()
    }

    /// Close the entity at `now`, truncated to whole seconds.
    ///
    /// No-op when already closed: `close_date` is assigned exactly once.
    fn close_at(&mut self, now: Timestamp) {
        if self.fully_invested() {
            return;
        }
        self.set_closed(truncate_to_seconds(now));
    }
}

/// A fundable entity whose target can be changed after creation.
///
/// Only charity projects qualify; donations are immutable once created.
pub trait Retargetable: Fundable {
    fn set_full_amount(&mut self, amount: Amount);
}
