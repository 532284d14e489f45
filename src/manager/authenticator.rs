//! `Authenticate`: answer with whatever the operator scripted.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Manager;
use crate::account::{AccountId, PropertyMap};
use crate::error::{AccountsError, ErrorName};

/// Scripted outcome for `Authenticate`, shared by every account
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AuthenticationReply {
    pub reply: PropertyMap,
    pub error_name: Option<String>,
}

impl AuthenticationReply {
    /// An empty error name means "no error".
    pub fn new(reply: PropertyMap, error_name: &str) -> Self {
        let error_name = if error_name.is_empty() {
            None
        } else {
            Some(error_name.to_string())
        };
        Self { reply, error_name }
    }

    pub fn error(&self) -> Option<ErrorName> {
        self.error_name.as_deref().map(ErrorName::parse)
    }
}

impl Manager {
    /// `service_id`, `interactive`, `invalidate` and `params` are accepted
    /// for protocol compatibility and do not affect the result.
    pub fn authenticate(
        &self,
        account_id: AccountId,
        service_id: &str,
        interactive: bool,
        invalidate: bool,
        params: &PropertyMap,
    ) -> Result<PropertyMap, AccountsError> {
        debug!(
            account_id,
            service_id,
            interactive,
            invalidate,
            params = params.len(),
            "Authenticate"
        );

        if !self.store.contains(account_id) {
            warn!(account_id, "Authenticate on unknown account");
            return Err(AccountsError::NoAccount(account_id));
        }
        if let Some(name) = self.authentication.error() {
            return Err(AccountsError::Scripted(name));
        }
        Ok(self.authentication.reply.clone())
    }

    pub fn authentication_reply(&self) -> &AuthenticationReply {
        &self.authentication
    }
}
