//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where
//!   the entity is editable at all

/// Implement [`qrkot_core::fundable::Fundable`] for a ledger row that stores
/// the funding state in flat columns named after the trait accessors.
macro_rules! impl_fundable {
    ($row:ty) => {
        impl qrkot_core::fundable::Fundable for $row {
            fn full_amount(&self) -> qrkot_core::types::Amount {
                self.full_amount
            }

            fn invested_amount(&self) -> qrkot_core::types::Amount {
                self.invested_amount
            }

            fn set_invested_amount(&mut self, amount: qrkot_core::types::Amount) {
                self.invested_amount = amount;
            }

            fn fully_invested(&self) -> bool {
                self.fully_invested
            }

            fn close_date(&self) -> Option<qrkot_core::types::Timestamp> {
                self.close_date
            }

            fn create_date(&self) -> qrkot_core::types::Timestamp {
                self.create_date
            }

            fn set_closed(&mut self, at: qrkot_core::types::Timestamp) {
                self.fully_invested = true;
                self.close_date = Some(at);
            }
        }
    };
}

pub mod charity_project;
pub mod donation;
pub mod user;
