//! Account model for the online accounts mock
//!
//! - Open-ended property maps as account details
//! - Monotonic id allocation
//! - `AccountChanged` broadcast on add and remove

pub mod store;
pub mod types;

pub use store::AccountStore;
pub use types::{
    AccountChanged, AccountEntry, AccountId, ChangeType, PropertyMap, Value, KEY_AUTH_METHOD,
    KEY_CHANGE_TYPE, KEY_DISPLAY_NAME, KEY_SERVICE_ID,
};
