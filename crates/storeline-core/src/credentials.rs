//! # Credential Check
//!
//! The single seam between log-in / account writes and the way passwords are
//! stored.
//!
//! ```text
//! create account ──► prepare(password) ──► Users.password
//! log in ──────────► verify(supplied, Users.password)
//! ```
//!
//! Existing rows hold plaintext, so [`PlaintextCredentials`] is the only
//! implementation shipped. A hashing scheme plugs in here without touching
//! any call site.

/// How supplied passwords are stored and compared.
pub trait CredentialCheck: Send + Sync {
    /// Turns a password typed by the user into the value written to the store.
    fn prepare(&self, password: &str) -> String;

    /// True when `supplied` matches the `stored` value.
    fn verify(&self, supplied: &str, stored: &str) -> bool;
}

/// Stores and compares passwords verbatim.
///
/// Trailing blanks are ignored on both sides: a `CHAR(n)` column pads the
/// stored value on the way back, so a typed trailing blank cannot be told
/// apart from padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextCredentials;

impl CredentialCheck for PlaintextCredentials {
    fn prepare(&self, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, supplied: &str, stored: &str) -> bool {
        supplied.trim_end_matches(' ') == stored.trim_end_matches(' ')
    }
}
