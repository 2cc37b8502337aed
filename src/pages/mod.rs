//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages call session store operations and render from the mirrored session
//! signal. Redirect policy lives in `util::guard`; pages only apply it.

pub mod home;
pub mod login;
pub mod member_select;
pub mod not_found;
pub mod signup;
