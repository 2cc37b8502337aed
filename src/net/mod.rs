//! Networking modules for the recipe API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the auth gateway and its HTTP implementation, `error` the
//! failure/outcome taxonomy, and `types` the shared wire schema.

pub mod api;
pub mod error;
pub mod types;
