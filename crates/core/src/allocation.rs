//! Allocation of unallocated funds between donations and charity projects.
//!
//! One allocation pass takes a newly created *subject* (a project or a
//! donation) and an ordered *pool* of open counterparts, and moves funds
//! between them until the subject is fully funded or the pool runs dry.
//! The routine is direction-agnostic: "donations fund a new project" and
//! "a new donation funds projects" are the same call with the entity types
//! swapped.
//!
//! The caller owns the query contract: the pool must contain only open
//! entities ordered by `(create_date, id)` ascending, and the caller must
//! hold exclusive access to every row involved until the results are
//! persisted. Entries with no remaining capacity are skipped rather than
//! rejected.

use serde::Serialize;

use crate::fundable::Fundable;
use crate::types::{Amount, Timestamp};

/// What a single allocation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationOutcome {
    /// Total amount moved between the subject and the pool.
    pub transferred: Amount,
    /// Indices into the pool of every entry that received or gave funds,
    /// in the order they were serviced. Only these need persisting.
    pub touched: Vec<usize>,
    /// Whether this pass closed the subject.
    pub subject_closed: bool,
}

impl AllocationOutcome {
    /// True when neither side was mutated.
    pub fn is_noop(&self) -> bool {
        self.transferred == 0 && self.touched.is_empty() && !self.subject_closed
    }
}

/// Run one allocation pass of `subject` against `pool`.
///
/// Mutates `invested_amount`, `fully_invested` and `close_date` in place on
/// the subject and on zero or more pool entries. Every close performed by
/// this pass uses `now` truncated to whole seconds.
///
/// - A subject that is already closed is left untouched.
/// - A subject with no remaining capacity is closed immediately; the pool
///   is not scanned.
/// - Pool entries with `remaining() <= 0` are skipped without halting the
///   scan.
pub fn allocate<S, P>(subject: &mut S, pool: &mut [P], now: Timestamp) -> AllocationOutcome
where
    S: Fundable + ?Sized,
    P: Fundable,
{
    let mut outcome = AllocationOutcome::default();

    if subject.fully_invested() {
        return outcome;
    }

    let mut remaining = subject.remaining();
    if remaining <= 0 {
        subject.close_at(now);
        outcome.subject_closed = true;
        return outcome;
    }

    for (index, entry) in pool.iter_mut().enumerate() {
        if remaining <= 0 {
            break;
        }

        let available = entry.remaining();
        if available <= 0 {
            continue;
        }

        let transfer = available.min(remaining);
        entry.set_invested_amount(entry.invested_amount() + transfer);
        subject.set_invested_amount(subject.invested_amount() + transfer);
        remaining -= transfer;
        outcome.transferred += transfer;
        outcome.touched.push(index);

        if entry.invested_amount() >= entry.full_amount() {
            entry.close_at(now);
        }
    }

    if subject.invested_amount() >= subject.full_amount() {
        subject.close_at(now);
        outcome.subject_closed = true;
    }

    outcome
}
