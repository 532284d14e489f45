//! Scriptable stand-in for the online accounts manager service.
//!
//! Clients talk to the manager interface (`GetAccounts`, `RequestAccess`,
//! `Authenticate`) and listen for `AccountChanged`; a test harness uses the
//! control interface to decide what those calls return.

pub mod account;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod manager;
pub mod rpc;

pub use account::{AccountChanged, AccountId, ChangeType, PropertyMap, Value};
pub use error::{AccountsError, ErrorName};
pub use manager::Manager;
