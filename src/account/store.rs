//! Account storage and change notification

use std::collections::HashMap;
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::types::{AccountChanged, AccountEntry, AccountId, ChangeType, PropertyMap};
use crate::error::AccountsError;

/// In-memory account store.
///
/// Ids come from `last_account_id`, which is incremented before every
/// assignment and never decreases, so ids start at 1 and are never reused.
pub struct AccountStore {
    accounts: HashMap<AccountId, PropertyMap>,
    last_account_id: AccountId,
    changes: broadcast::Sender<AccountChanged>,
}

impl AccountStore {
    /// Create an empty store emitting changes on `changes`
    pub fn new(changes: broadcast::Sender<AccountChanged>) -> Self {
        Self {
            accounts: HashMap::new(),
            last_account_id: 0,
            changes,
        }
    }

    /// All stored accounts, ordered by id
    pub fn list(&self) -> Vec<AccountEntry> {
        let mut entries: Vec<AccountEntry> = self
            .accounts
            .iter()
            .map(|(id, details)| (*id, details.clone()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    /// Store a new account and announce it as enabled
    pub fn add(&mut self, details: PropertyMap) -> AccountId {
        self.last_account_id += 1;
        let account_id = self.last_account_id;

        let change = AccountChanged::new(account_id, &details, ChangeType::Enabled);
        self.accounts.insert(account_id, details);
        info!(account_id, service_id = %change.service_id, "account added");
        self.emit(change);

        account_id
    }

    /// Announce an account as disabled, then drop it
    pub fn remove(&mut self, account_id: AccountId) -> Result<PropertyMap, AccountsError> {
        let details = self
            .accounts
            .get(&account_id)
            .ok_or(AccountsError::InvalidAccountId(account_id))?;

        let change = AccountChanged::new(account_id, details, ChangeType::Disabled);
        info!(account_id, service_id = %change.service_id, "account removed");
        self.emit(change);

        self.accounts
            .remove(&account_id)
            .ok_or(AccountsError::InvalidAccountId(account_id))
    }

    pub fn get(&self, account_id: AccountId) -> Option<&PropertyMap> {
        self.accounts.get(&account_id)
    }

    pub fn contains(&self, account_id: AccountId) -> bool {
        self.accounts.contains_key(&account_id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn last_account_id(&self) -> AccountId {
        self.last_account_id
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AccountChanged> {
        self.changes.subscribe()
    }

    pub fn change_sender(&self) -> broadcast::Sender<AccountChanged> {
        self.changes.clone()
    }

    // Fire and forget: nobody listening is fine.
    fn emit(&self, change: AccountChanged) {
        if self.changes.send(change).is_err() {
            debug!("AccountChanged emitted with no subscribers");
        }
    }
}
