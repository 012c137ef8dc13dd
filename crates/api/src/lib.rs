//! QRKot API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth,
//! allocation cycles, routes) so integration tests and the binary
//! entrypoint share them.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod investment;
pub mod middleware;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
