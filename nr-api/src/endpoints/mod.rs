//! API endpoint modules organized by category.
//!
//! Each module adds typed methods on [`crate::ApiClient`] for a group of
//! related Admin API endpoints.

pub mod auth;
pub mod settings;
pub mod flows;
pub mod nodes;
