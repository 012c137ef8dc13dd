//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Plain
//! reads accept `&PgPool`; methods that take part in a ledger transaction
//! accept `&mut PgConnection` so callers can pass `&mut *tx`.

pub mod charity_project_repo;
pub mod donation_repo;
pub mod user_repo;

pub use charity_project_repo::CharityProjectRepo;
pub use donation_repo::DonationRepo;
pub use user_repo::UserRepo;
