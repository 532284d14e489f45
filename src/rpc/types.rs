// RPC types for JSON-RPC 2.0 protocol
use serde::{Deserialize, Serialize};

use crate::account::{AccountId, PropertyMap};
use crate::error::AccountsError;

pub const INVALID_PARAMS: i32 = -32602;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INTERNAL_ERROR: i32 = -32603;
/// Refusal by the service (scripted or not); `name` says which.
pub const SERVICE_ERROR: i32 = -32000;
/// Misuse of the control interface
pub const CONTROL_FAULT: i32 = -32001;

#[derive(Serialize, Deserialize, Debug)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: u64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    /// Namespaced error identifier, present for service errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            name: None,
        }
    }
}

impl From<AccountsError> for RpcError {
    fn from(err: AccountsError) -> Self {
        let code = if err.is_programming_error() {
            CONTROL_FAULT
        } else {
            SERVICE_ERROR
        };
        Self {
            code,
            message: err.to_string(),
            name: Some(err.name().to_string()),
        }
    }
}

// Method-specific parameter types

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct GetAccountsParams {
    #[serde(default)]
    pub filter: PropertyMap,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RequestAccessParams {
    pub service_id: String,
    #[serde(default)]
    pub params: PropertyMap,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateParams {
    pub account_id: AccountId,
    pub service_id: String,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub invalidate: bool,
    #[serde(default)]
    pub params: PropertyMap,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AccountDetailsParams {
    pub details: PropertyMap,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAccountParams {
    pub account_id: AccountId,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetAuthenticationReplyParams {
    #[serde(default)]
    pub reply: PropertyMap,
    #[serde(default)]
    pub error_name: String,
}

/// Frame pushed to `/signals` subscribers
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SignalFrame {
    pub signal: String,
    #[serde(flatten)]
    pub change: crate::account::AccountChanged,
}
