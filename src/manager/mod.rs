//! The simulated accounts manager.
//!
//! A `Manager` is one service instance: it owns the account store, the
//! template used by `RequestAccess` and the scripted authentication reply.
//! Client-facing operations live in `access` and `authenticator`, the
//! operator-facing ones in `control`.

pub mod access;
pub mod authenticator;
pub mod control;

use tokio::sync::broadcast;
use tracing::debug;

use crate::account::{AccountChanged, AccountEntry, AccountStore, PropertyMap};

pub use access::AccessGrant;
pub use authenticator::AuthenticationReply;

pub struct Manager {
    store: AccountStore,
    /// Details of the account created by the next `RequestAccess`; empty
    /// means every request is denied.
    request_access_reply: PropertyMap,
    authentication: AuthenticationReply,
}

impl Manager {
    /// Fresh instance: no accounts, deny all access requests.
    pub fn new(signal_capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(signal_capacity.max(1));
        Self {
            store: AccountStore::new(changes),
            request_access_reply: PropertyMap::new(),
            authentication: AuthenticationReply::default(),
        }
    }

    /// List all accounts. The filter is accepted for compatibility only.
    pub fn get_accounts(&self, filter: &PropertyMap) -> Vec<AccountEntry> {
        if !filter.is_empty() {
            debug!(?filter, "GetAccounts filter ignored");
        }
        self.store.list()
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AccountChanged> {
        self.store.subscribe()
    }

    pub fn change_sender(&self) -> broadcast::Sender<AccountChanged> {
        self.store.change_sender()
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SIGNAL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{ChangeType, Value, KEY_DISPLAY_NAME, KEY_SERVICE_ID};
    use crate::error::{AccountsError, ErrorName};

    fn props(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_fresh_instance_is_empty() {
        let manager = Manager::default();
        assert!(manager.get_accounts(&PropertyMap::new()).is_empty());
    }

    #[test]
    fn test_scenario_request_access_granted() {
        let mut manager = Manager::default();
        let mut rx = manager.subscribe();
        assert!(manager.get_accounts(&PropertyMap::new()).is_empty());

        let template = props(&[(KEY_SERVICE_ID, "svc1"), (KEY_DISPLAY_NAME, "Bob")]);
        manager.set_request_access_reply(template.clone());
        manager.set_authentication_reply(props(&[("token", "abc")]), "");

        let grant = manager.request_access("svc1", &PropertyMap::new()).unwrap();
        assert_eq!(grant.account, (1, template.clone()));
        assert_eq!(grant.authentication, props(&[("token", "abc")]));

        assert_eq!(manager.get_accounts(&PropertyMap::new()), vec![(1, template)]);

        let change = rx.try_recv().unwrap();
        assert_eq!(change.service_id, "svc1");
        assert_eq!(change.account_id, 1);
        assert_eq!(change.change_type(), Some(ChangeType::Enabled));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_scenario_fresh_instance_denies() {
        let mut manager = Manager::default();
        let mut rx = manager.subscribe();

        let err = manager.request_access("svc1", &PropertyMap::new()).unwrap_err();
        assert_eq!(err, AccountsError::PermissionDenied);
        assert_eq!(err.kind(), ErrorName::PermissionDenied);
        assert!(manager.get_accounts(&PropertyMap::new()).is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_scenario_scripted_cancel() {
        let mut manager = Manager::default();

        let id = manager.add_account(props(&[(KEY_SERVICE_ID, "svc2")]));
        assert_eq!(id, 1);
        manager.set_authentication_reply(
            PropertyMap::new(),
            "com.ubuntu.OnlineAccounts.Error.UserCanceled",
        );

        let err = manager
            .authenticate(1, "svc2", true, false, &PropertyMap::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorName::UserCanceled);
    }

    #[test]
    fn test_get_accounts_ignores_filter() {
        let mut manager = Manager::default();
        manager.add_account(props(&[(KEY_SERVICE_ID, "svc1")]));
        manager.add_account(props(&[(KEY_SERVICE_ID, "svc2")]));

        let filter = props(&[(KEY_SERVICE_ID, "svc1")]);
        assert_eq!(manager.get_accounts(&filter).len(), 2);
    }
}
