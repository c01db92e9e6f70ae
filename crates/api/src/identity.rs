//! Identity providers.
//!
//! The service never sees passwords. It hands the bearer credential from a
//! request to an [`IdentityProvider`] and gets back the user it belongs to.

use hashbrown::HashMap;
use tabula_core::{Error, Result, UserId};

/// Verifies bearer credentials.
pub trait IdentityProvider {
    /// Returns the user a credential was issued to, or `Unauthenticated`.
    fn verify(&self, credential: &str) -> Result<UserId>;

    /// Called after a user's email changes. Providers that bind credentials
    /// to the email rebind them here and may hand back a fresh credential.
    fn rename_subject(&mut self, _from: &UserId, _to: &UserId) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Opaque tokens held in memory.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    tokens: HashMap<String, UserId>,
    issued: u64,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new token for `user`.
    pub fn issue(&mut self, user: &UserId) -> String {
        self.issued += 1;
        let token = format!("tbl_{:016x}", self.issued);
        self.tokens.insert(token.clone(), user.clone());
        token
    }
}

impl IdentityProvider for StaticIdentity {
    fn verify(&self, credential: &str) -> Result<UserId> {
        self.tokens
            .get(credential)
            .cloned()
            .ok_or(Error::Unauthenticated)
    }

    fn rename_subject(&mut self, from: &UserId, to: &UserId) -> Result<Option<String>> {
        for user in self.tokens.values_mut() {
            if user == from {
                *user = to.clone();
            }
        }
        Ok(Some(self.issue(to)))
    }
}
