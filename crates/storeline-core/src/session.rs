//! # Session
//!
//! The currently authenticated identity, held by the menu driver and passed
//! by reference into every operation.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Session::anonymous() ──► log in ok ──► sign_in(identity)              │
//! │          ▲                                   │                          │
//! │          │                                   ▼                          │
//! │          └─────────── sign_out() ◄──── "20. Log out"                   │
//! │                                                                         │
//! │  A failed log-in never touches the session.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::{Identity, Role};

/// Holds at most one authenticated identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    /// A session with nobody logged in.
    pub fn anonymous() -> Self {
        Session::default()
    }

    /// Replaces whatever identity was held with `identity`.
    pub fn sign_in(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Clears the identity.
    pub fn sign_out(&mut self) {
        self.identity = None;
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }

    /// Returns the identity of any logged-in user.
    pub fn require_user(&self) -> CoreResult<&Identity> {
        self.identity.as_ref().ok_or(CoreError::NotAuthenticated)
    }

    /// Returns the identity only when its role is exactly `required`.
    ///
    /// Roles do not nest: an admin is refused manager operations.
    pub fn require_role(&self, required: Role) -> CoreResult<&Identity> {
        let identity = self.require_user()?;
        if identity.role == required {
            Ok(identity)
        } else {
            Err(CoreError::PermissionDenied { required })
        }
    }
}
