//! Account type definitions for the online accounts mock

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Account identifier, assigned by the store. Not stable across restarts.
pub type AccountId = u32;

/// Open-ended, ordered mapping of property names to typed values.
pub type PropertyMap = BTreeMap<String, Value>;

/// One stored account as it travels on the wire: `(id, details)`.
pub type AccountEntry = (AccountId, PropertyMap);

/// Keys for the account details dictionary
pub const KEY_SERVICE_ID: &str = "serviceId";
pub const KEY_DISPLAY_NAME: &str = "displayName";
pub const KEY_AUTH_METHOD: &str = "authMethod";
pub const KEY_CHANGE_TYPE: &str = "changeType";

/// A typed property value.
///
/// Serialized untagged, so `{"displayName": "Bob", "enabled": true}` maps
/// straight onto `Str` and `Bool` entries.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    /// Unsigned values above `i64::MAX`; tried before `Double` so they
    /// stay exact.
    UInt(u64),
    Double(f64),
    Str(String),
    List(Vec<Value>),
    Map(PropertyMap),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<PropertyMap> for Value {
    fn from(m: PropertyMap) -> Self {
        Value::Map(m)
    }
}

/// Kind of change carried by an `AccountChanged` notification.
///
/// Reaches the wire only as the integer `changeType` entry, through
/// `From<ChangeType> for Value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ChangeType {
    Enabled = 0,
    Disabled = 1,
    /// Part of the vocabulary; no operation emits it.
    Updated = 2,
}

impl From<ChangeType> for Value {
    fn from(c: ChangeType) -> Self {
        Value::Int(c as i64)
    }
}

/// Point-in-time `AccountChanged` broadcast payload
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountChanged {
    pub service_id: String,
    pub account_id: AccountId,
    /// Snapshot of the account details, including `changeType`.
    pub details: PropertyMap,
}

impl AccountChanged {
    /// Build a notification from an account's details, tagged with its
    /// `serviceId` (empty when absent).
    pub fn new(account_id: AccountId, details: &PropertyMap, change: ChangeType) -> Self {
        let service_id = details
            .get(KEY_SERVICE_ID)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let mut details = details.clone();
        details.insert(KEY_CHANGE_TYPE.to_string(), change.into());
        Self {
            service_id,
            account_id,
            details,
        }
    }

    pub fn change_type(&self) -> Option<ChangeType> {
        match self.details.get(KEY_CHANGE_TYPE).and_then(Value::as_i64) {
            Some(0) => Some(ChangeType::Enabled),
            Some(1) => Some(ChangeType::Disabled),
            Some(2) => Some(ChangeType::Updated),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_untagged_json() {
        let json = r#"{"serviceId":"svc1","port":8080,"enabled":true,"scopes":["a","b"]}"#;
        let map: PropertyMap = serde_json::from_str(json).unwrap();

        assert_eq!(map["serviceId"], Value::Str("svc1".into()));
        assert_eq!(map["port"], Value::Int(8080));
        assert_eq!(map["enabled"], Value::Bool(true));
        assert_eq!(
            map["scopes"],
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn test_notification_without_service_id() {
        let mut details = PropertyMap::new();
        details.insert(KEY_DISPLAY_NAME.into(), "Bob".into());

        let change = AccountChanged::new(7, &details, ChangeType::Disabled);
        assert_eq!(change.service_id, "");
        assert_eq!(change.account_id, 7);
        assert_eq!(change.change_type(), Some(ChangeType::Disabled));
        assert_eq!(change.details[KEY_DISPLAY_NAME], Value::from("Bob"));
        // the source map is left untouched
        assert!(!details.contains_key(KEY_CHANGE_TYPE));
    }

    #[test]
    fn test_u64_max_kept_exact() {
        let json = r#"{"big":18446744073709551615,"small":-5}"#;
        let map: PropertyMap = serde_json::from_str(json).unwrap();

        assert_eq!(map["big"], Value::UInt(u64::MAX));
        assert_eq!(map["small"], Value::Int(-5));
        assert_eq!(serde_json::to_string(&map).unwrap(), json);
    }

    #[test]
    fn test_change_type_is_integer_on_wire() {
        let values: Vec<Value> = [ChangeType::Enabled, ChangeType::Disabled, ChangeType::Updated]
            .into_iter()
            .map(Value::from)
            .collect();
        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            serde_json::json!([0, 1, 2])
        );
    }

    #[test]
    fn test_entry_serializes_as_pair() {
        let mut details = PropertyMap::new();
        details.insert(KEY_SERVICE_ID.into(), "svc".into());
        let entry: AccountEntry = (3, details);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!([3, {"serviceId": "svc"}]));
    }
}
