use super::types::*;
use crate::manager::Manager;
use crate::rpc::RpcState;
use axum::{debug_handler, extract::State, Json};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Manager interface dispatcher: `GetAccounts`, `RequestAccess`, `Authenticate`.
#[debug_handler]
pub async fn handle_manager_request(
    State(state): State<RpcState>,
    Json(req): Json<RpcRequest>,
) -> Json<RpcResponse> {
    debug!("RPC Request: method={}, id={}", req.method, req.id);

    let result = match req.method.as_str() {
        "GetAccounts" => handle_get_accounts(&state, req.params).await,
        "RequestAccess" => handle_request_access(&state, req.params).await,
        "Authenticate" => handle_authenticate(&state, req.params).await,
        _ => Err(method_not_found(&req.method)),
    };

    respond(req.id, result)
}

/// Control interface dispatcher used by test harnesses.
#[debug_handler]
pub async fn handle_mock_request(
    State(state): State<RpcState>,
    Json(req): Json<RpcRequest>,
) -> Json<RpcResponse> {
    debug!("Mock Request: method={}, id={}", req.method, req.id);

    let result = match req.method.as_str() {
        "AddAccount" => handle_add_account(&state, req.params).await,
        "RemoveAccount" => handle_remove_account(&state, req.params).await,
        "SetRequestAccessReply" => handle_set_request_access_reply(&state, req.params).await,
        "SetAuthenticationReply" => handle_set_authentication_reply(&state, req.params).await,
        _ => Err(method_not_found(&req.method)),
    };

    respond(req.id, result)
}

fn respond(id: u64, result: Result<serde_json::Value, RpcError>) -> Json<RpcResponse> {
    match result {
        Ok(val) => Json(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(val),
            error: None,
            id,
        }),
        Err(err) => {
            if let Some(name) = &err.name {
                warn!("RPC error {}: {}", name, err.message);
            }
            Json(RpcResponse {
                jsonrpc: "2.0".to_string(),
                result: None,
                error: Some(err),
                id,
            })
        }
    }
}

fn method_not_found(method: &str) -> RpcError {
    RpcError::new(METHOD_NOT_FOUND, format!("Method not found: {}", method))
}

//
// === Helper Functions for Safe Operations ===
//
/// Safely acquire a mutex lock, recovering from poison
fn safe_lock<T>(mutex: &Arc<Mutex<T>>) -> Result<std::sync::MutexGuard<'_, T>, RpcError> {
    mutex.lock().map_err(|e| {
        tracing::error!("Mutex poisoned: {}", e);
        RpcError::new(INTERNAL_ERROR, "Internal error: mutex poisoned")
    })
}

/// Safely serialize to JSON value
fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, RpcError> {
    serde_json::to_value(value)
        .map_err(|e| RpcError::new(INTERNAL_ERROR, format!("Serialization error: {}", e)))
}

/// Parse named params; `null` counts as an empty object.
fn parse_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T, RpcError> {
    let params = if params.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        params
    };
    serde_json::from_value(params)
        .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))
}

fn with_manager<R>(
    state: &RpcState,
    f: impl FnOnce(&mut Manager) -> R,
) -> Result<R, RpcError> {
    let mut manager = safe_lock(&state.manager)?;
    Ok(f(&mut manager))
}

//
// === Manager interface ===
//

/// Handle GetAccounts(filter)
async fn handle_get_accounts(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: GetAccountsParams = parse_params(params)?;
    let accounts = with_manager(state, |m| m.get_accounts(&p.filter))?;
    to_json(&accounts)
}

/// Handle RequestAccess(serviceId, params)
async fn handle_request_access(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: RequestAccessParams = parse_params(params)?;
    let grant = with_manager(state, |m| m.request_access(&p.service_id, &p.params))??;
    to_json(&grant)
}

/// Handle Authenticate(accountId, serviceId, interactive, invalidate, params)
async fn handle_authenticate(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: AuthenticateParams = parse_params(params)?;
    let reply = with_manager(state, |m| {
        m.authenticate(
            p.account_id,
            &p.service_id,
            p.interactive,
            p.invalidate,
            &p.params,
        )
    })??;
    to_json(&reply)
}

//
// === Control interface ===
//

/// Handle AddAccount(details) -> id
async fn handle_add_account(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: AccountDetailsParams = parse_params(params)?;
    let account_id = with_manager(state, |m| m.add_account(p.details))?;
    to_json(&account_id)
}

/// Handle RemoveAccount(accountId)
async fn handle_remove_account(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: RemoveAccountParams = parse_params(params)?;
    with_manager(state, |m| m.remove_account(p.account_id))??;
    Ok(serde_json::Value::Null)
}

/// Handle SetRequestAccessReply(details)
async fn handle_set_request_access_reply(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: AccountDetailsParams = parse_params(params)?;
    with_manager(state, |m| m.set_request_access_reply(p.details))?;
    Ok(serde_json::Value::Null)
}

/// Handle SetAuthenticationReply(reply, errorName)
async fn handle_set_authentication_reply(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: SetAuthenticationReplyParams = parse_params(params)?;
    with_manager(state, |m| m.set_authentication_reply(p.reply, &p.error_name))?;
    Ok(serde_json::Value::Null)
}
