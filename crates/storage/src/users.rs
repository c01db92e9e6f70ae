//! Registered accounts.
//!
//! An account is identified by its email, which doubles as the [`UserId`]
//! datasets are owned by. Credentials live with the identity provider.

use alloc::collections::BTreeSet;
use tabula_core::{Error, Result, UserId};

/// Set of registered accounts.
#[derive(Clone, Debug, Default)]
pub struct UserDirectory {
    users: BTreeSet<UserId>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new account.
    pub fn register(&mut self, email: &str) -> Result<UserId> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::invalid_argument("Email must not be empty"));
        }
        let user = UserId::from(email);
        if !self.users.insert(user.clone()) {
            return Err(Error::conflict("Email already registered"));
        }
        Ok(user)
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.users.contains(user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Checks that `current` may move to `new_email` and returns the new id.
    /// The directory is not modified.
    pub fn check_change(&self, current: &UserId, new_email: &str) -> Result<UserId> {
        let new_email = new_email.trim();
        if new_email.is_empty() {
            return Err(Error::invalid_argument("Email must not be empty"));
        }
        if new_email == current.as_str() {
            return Err(Error::invalid_argument("New email is same as current email"));
        }
        let next = UserId::from(new_email);
        if self.users.contains(&next) {
            return Err(Error::conflict("Email already in use by another account"));
        }
        if !self.users.contains(current) {
            return Err(Error::not_found("User", current.as_str()));
        }
        Ok(next)
    }

    /// Moves an account to a new email and returns the new id.
    ///
    /// Only the directory entry changes; the caller moves owned datasets.
    pub fn change_email(&mut self, current: &UserId, new_email: &str) -> Result<UserId> {
        let next = self.check_change(current, new_email)?;
        self.users.remove(current);
        self.users.insert(next.clone());
        Ok(next)
    }
}
