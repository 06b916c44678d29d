use serde::{Deserialize, Serialize};

use crate::account::Account;

/// Default name used when a roster is created without any saved data.
pub const DEFAULT_ACCOUNT_NAME: &str = "Default";

/// The ordered account collection.
///
/// Serializes transparently as the bare account array, which is the exact
/// snapshot schema used for persistence, export, and import. Services keep
/// the "always at least one account" rule; the type itself stays a plain
/// container so deserialization accepts whatever the snapshot holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Roster {
    pub accounts: Vec<Account>,
}

impl Roster {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// A fresh roster holding the single default account.
    pub fn with_default_account() -> Self {
        Self {
            accounts: vec![Account::new(DEFAULT_ACCOUNT_NAME)],
        }
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn first(&self) -> Option<&Account> {
        self.accounts.first()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
