//! Domain core for the QRKot donation ledger.
//!
//! Holds the fundable entity abstraction, the allocation algorithm that
//! matches open donations to open charity projects, and the business rules
//! guarding project edits and deletion. This crate has no database or HTTP
//! dependencies; callers load entities, run the pure functions here, and
//! persist the results.

pub mod allocation;
pub mod charity_project;
pub mod error;
pub mod fundable;
pub mod types;
