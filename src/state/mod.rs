//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` is the plain snapshot components render from, `storage` the
//! durable copy, and `store` the owner that keeps the two in step with the
//! auth gateway.

pub mod session;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
