pub mod auth;
pub mod charity_project;
pub mod donation;
