// RPC client for driving a running mock over JSON-RPC
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

use crate::account::{AccountEntry, AccountId, PropertyMap};
use crate::manager::AccessGrant;
use crate::rpc::types::{RpcError, RpcResponse};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("RPC request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{}", describe_remote(.0))]
    Remote(RpcError),
}

fn describe_remote(err: &RpcError) -> String {
    match &err.name {
        Some(name) => format!("{} ({}): {}", name, err.code, err.message),
        None => format!("error {}: {}", err.code, err.message),
    }
}

impl ClientError {
    /// Namespaced error name when the service refused the call
    pub fn name(&self) -> Option<&str> {
        match self {
            ClientError::Remote(err) => err.name.as_deref(),
            _ => None,
        }
    }
}

pub struct RpcClient {
    url: String,
    client: Client,
    request_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client: Client::new(),
            request_id: AtomicU64::new(1),
        }
    }

    pub fn manager_url(&self) -> String {
        format!("{}/", self.url)
    }

    pub fn mock_url(&self) -> String {
        format!("{}/mock", self.url)
    }

    pub async fn get_accounts(&self, filter: &PropertyMap) -> Result<Vec<AccountEntry>, ClientError> {
        self.send_request(&self.manager_url(), "GetAccounts", json!({ "filter": filter }))
            .await
    }

    pub async fn request_access(
        &self,
        service_id: &str,
        params: &PropertyMap,
    ) -> Result<AccessGrant, ClientError> {
        self.send_request(
            &self.manager_url(),
            "RequestAccess",
            json!({ "serviceId": service_id, "params": params }),
        )
        .await
    }

    pub async fn authenticate(
        &self,
        account_id: AccountId,
        service_id: &str,
        interactive: bool,
        invalidate: bool,
        params: &PropertyMap,
    ) -> Result<PropertyMap, ClientError> {
        self.send_request(
            &self.manager_url(),
            "Authenticate",
            json!({
                "accountId": account_id,
                "serviceId": service_id,
                "interactive": interactive,
                "invalidate": invalidate,
                "params": params,
            }),
        )
        .await
    }

    pub async fn add_account(&self, details: &PropertyMap) -> Result<AccountId, ClientError> {
        self.send_request(&self.mock_url(), "AddAccount", json!({ "details": details }))
            .await
    }

    pub async fn remove_account(&self, account_id: AccountId) -> Result<(), ClientError> {
        self.send_request(&self.mock_url(), "RemoveAccount", json!({ "accountId": account_id }))
            .await
    }

    pub async fn set_request_access_reply(&self, details: &PropertyMap) -> Result<(), ClientError> {
        self.send_request(
            &self.mock_url(),
            "SetRequestAccessReply",
            json!({ "details": details }),
        )
        .await
    }

    pub async fn set_authentication_reply(
        &self,
        reply: &PropertyMap,
        error_name: &str,
    ) -> Result<(), ClientError> {
        self.send_request(
            &self.mock_url(),
            "SetAuthenticationReply",
            json!({ "reply": reply, "errorName": error_name }),
        )
        .await
    }

    // Helper for sending requests
    async fn send_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ClientError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        let response: RpcResponse = self
            .client
            .post(endpoint)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        decode_response(response)
    }
}

fn decode_response<T: DeserializeOwned>(response: RpcResponse) -> Result<T, ClientError> {
    if let Some(error) = response.error {
        return Err(ClientError::Remote(error));
    }
    let result = response.result.unwrap_or(serde_json::Value::Null);
    Ok(serde_json::from_value(result)?)
}
