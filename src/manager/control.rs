//! Control interface: lets a test harness script the next replies and
//! inject or drop accounts directly.

use tracing::info;

use super::{AuthenticationReply, Manager};
use crate::account::{AccountId, PropertyMap};
use crate::config::ScriptConfig;
use crate::error::AccountsError;

impl Manager {
    /// Replace the `RequestAccess` template. An empty map restores deny-all.
    pub fn set_request_access_reply(&mut self, details: PropertyMap) {
        info!(fields = details.len(), "RequestAccess reply programmed");
        self.request_access_reply = details;
    }

    /// Replace the scripted authentication outcome
    pub fn set_authentication_reply(&mut self, reply: PropertyMap, error_name: &str) {
        info!(fields = reply.len(), error_name, "Authenticate reply programmed");
        self.authentication = AuthenticationReply::new(reply, error_name);
    }

    pub fn add_account(&mut self, details: PropertyMap) -> AccountId {
        self.store.add(details)
    }

    /// Removing an id that is not stored is reported as
    /// `AccountsError::InvalidAccountId`.
    pub fn remove_account(&mut self, account_id: AccountId) -> Result<(), AccountsError> {
        self.store.remove(account_id).map(|_| ())
    }

    pub fn request_access_reply(&self) -> &PropertyMap {
        &self.request_access_reply
    }

    /// Pre-program a fresh instance from configuration
    pub fn apply_script(&mut self, script: &ScriptConfig) {
        for details in &script.accounts {
            self.add_account(details.clone());
        }
        if !script.request_access_reply.is_empty() {
            self.set_request_access_reply(script.request_access_reply.clone());
        }
        if !script.authentication_reply.is_empty() || !script.authentication_error.is_empty() {
            self.set_authentication_reply(
                script.authentication_reply.clone(),
                &script.authentication_error,
            );
        }
    }
}
