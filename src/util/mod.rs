//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `guard` holds the pure route-access policy; `auth` wires it into the
//! router so pages never repeat redirect logic.

pub mod auth;
pub mod guard;
