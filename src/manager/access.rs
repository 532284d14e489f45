//! `RequestAccess`: create an account from the programmed template, then
//! authenticate it.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::Manager;
use crate::account::{AccountEntry, PropertyMap};
use crate::error::AccountsError;

/// Successful `RequestAccess` reply: the new account and its
/// authentication data. Serialized as `[[id, details], reply]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(into = "(AccountEntry, PropertyMap)", from = "(AccountEntry, PropertyMap)")]
pub struct AccessGrant {
    pub account: AccountEntry,
    pub authentication: PropertyMap,
}

impl From<AccessGrant> for (AccountEntry, PropertyMap) {
    fn from(grant: AccessGrant) -> Self {
        (grant.account, grant.authentication)
    }
}

impl From<(AccountEntry, PropertyMap)> for AccessGrant {
    fn from((account, authentication): (AccountEntry, PropertyMap)) -> Self {
        Self {
            account,
            authentication,
        }
    }
}

impl Manager {
    /// The account is created before authentication runs, so it exists
    /// even when authentication then fails.
    pub fn request_access(
        &mut self,
        service_id: &str,
        params: &PropertyMap,
    ) -> Result<AccessGrant, AccountsError> {
        if self.request_access_reply.is_empty() {
            warn!(service_id, "RequestAccess denied: no reply programmed");
            return Err(AccountsError::PermissionDenied);
        }

        let details = self.request_access_reply.clone();
        let account_id = self.store.add(details.clone());
        info!(account_id, service_id, "RequestAccess created account");

        let authentication = self.authenticate(account_id, service_id, true, false, params)?;
        Ok(AccessGrant {
            account: (account_id, details),
            authentication,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{ChangeType, Value, KEY_SERVICE_ID};
    use crate::error::{ErrorName, ERROR_INTERACTION_REQUIRED};

    fn template(service: &str) -> PropertyMap {
        let mut d = PropertyMap::new();
        d.insert(KEY_SERVICE_ID.into(), service.into());
        d.insert("displayName".into(), "Bob".into());
        d
    }

    #[test]
    fn test_template_reused_across_calls() {
        let mut manager = Manager::default();
        manager.set_request_access_reply(template("svc"));

        let first = manager.request_access("svc", &PropertyMap::new()).unwrap();
        let second = manager.request_access("svc", &PropertyMap::new()).unwrap();

        assert_eq!(first.account.0, 1);
        assert_eq!(second.account.0, 2);
        assert_eq!(first.account.1, second.account.1);
        assert_eq!(manager.store().len(), 2);
    }

    #[test]
    fn test_account_created_even_when_auth_fails() {
        let mut manager = Manager::default();
        let mut rx = manager.subscribe();
        manager.set_request_access_reply(template("svc"));
        manager.set_authentication_reply(PropertyMap::new(), ERROR_INTERACTION_REQUIRED);

        let err = manager.request_access("svc", &PropertyMap::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorName::InteractionRequired);

        assert_eq!(manager.get_accounts(&PropertyMap::new()), vec![(1, template("svc"))]);
        let change = rx.try_recv().unwrap();
        assert_eq!(change.change_type(), Some(ChangeType::Enabled));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_reply_ignores_params() {
        let mut manager = Manager::default();
        manager.set_request_access_reply(template("svc"));
        let mut reply = PropertyMap::new();
        reply.insert("AccessToken".into(), "t0k3n".into());
        manager.set_authentication_reply(reply.clone(), "");

        let mut params = PropertyMap::new();
        params.insert("Scopes".into(), Value::List(vec!["mail".into()]));
        let grant = manager.request_access("other-service", &params).unwrap();
        assert_eq!(grant.authentication, reply);
    }

    #[test]
    fn test_large_unsigned_field_survives_request() {
        let details: PropertyMap =
            serde_json::from_str(r#"{"serviceId":"svc","quota":18446744073709551615}"#).unwrap();
        let mut manager = Manager::default();
        manager.set_request_access_reply(details.clone());

        let grant = manager.request_access("svc", &PropertyMap::new()).unwrap();
        assert_eq!(grant.account.1, details);
        assert_eq!(grant.account.1["quota"], Value::UInt(u64::MAX));

        let json = serde_json::to_string(&grant).unwrap();
        assert!(json.contains("18446744073709551615"));
    }

    #[test]
    fn test_grant_wire_shape() {
        let grant = AccessGrant {
            account: (5, template("svc")),
            authentication: PropertyMap::new(),
        };
        let json = serde_json::to_value(&grant).unwrap();
        assert_eq!(
            json,
            serde_json::json!([[5, {"serviceId": "svc", "displayName": "Bob"}], {}])
        );
        let back: AccessGrant = serde_json::from_value(json).unwrap();
        assert_eq!(back, grant);
    }
}
