//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Snapshot of who is logged in, which family roster is loaded and which
//! member is acting. The store owns the authoritative copy; route guards and
//! components read a mirrored `RwSignal<SessionState>`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::{Member, User};

/// Identity state plus UI-facing request status.
///
/// Authentication flags are derived from the fields on every read and are
/// never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub members: Vec<Member>,
    pub current_member: Option<Member>,
    /// A login or signup request is in flight.
    pub loading: bool,
    /// Last user-facing failure message.
    pub error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_selected_member(&self) -> bool {
        self.is_authenticated() && self.current_member.is_some()
    }

    pub fn has_members(&self) -> bool {
        self.is_authenticated() && !self.members.is_empty()
    }

    /// Whether the acting member appears in the loaded roster.
    ///
    /// Roster refreshes lag selection, so a mismatch is tolerated rather than
    /// corrected.
    pub fn current_member_in_roster(&self) -> bool {
        match &self.current_member {
            Some(current) => self.members.iter().any(|m| m.id == current.id),
            None => false,
        }
    }
}
