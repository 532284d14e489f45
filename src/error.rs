use thiserror::Error;

use crate::account::AccountId;

pub const ERROR_PREFIX: &str = "com.ubuntu.OnlineAccounts.Error.";
pub const ERROR_NO_ACCOUNT: &str = "com.ubuntu.OnlineAccounts.Error.NoAccount";
pub const ERROR_USER_CANCELED: &str = "com.ubuntu.OnlineAccounts.Error.UserCanceled";
pub const ERROR_PERMISSION_DENIED: &str = "com.ubuntu.OnlineAccounts.Error.PermissionDenied";
pub const ERROR_INTERACTION_REQUIRED: &str =
    "com.ubuntu.OnlineAccounts.Error.InteractionRequired";

/// Raised only by the control interface, never by the manager interface.
pub const ERROR_INVALID_ACCOUNT_ID: &str =
    "com.ubuntu.OnlineAccounts.Mock.Error.InvalidAccountId";

/// Namespaced error identifier as seen by clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorName {
    NoAccount,
    UserCanceled,
    PermissionDenied,
    InteractionRequired,
    /// Any other name an operator scripts, kept verbatim.
    Other(String),
}

impl ErrorName {
    pub fn parse(name: &str) -> Self {
        match name {
            ERROR_NO_ACCOUNT => ErrorName::NoAccount,
            ERROR_USER_CANCELED => ErrorName::UserCanceled,
            ERROR_PERMISSION_DENIED => ErrorName::PermissionDenied,
            ERROR_INTERACTION_REQUIRED => ErrorName::InteractionRequired,
            other => ErrorName::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ErrorName::NoAccount => ERROR_NO_ACCOUNT,
            ErrorName::UserCanceled => ERROR_USER_CANCELED,
            ErrorName::PermissionDenied => ERROR_PERMISSION_DENIED,
            ErrorName::InteractionRequired => ERROR_INTERACTION_REQUIRED,
            ErrorName::Other(name) => name,
        }
    }
}

impl std::fmt::Display for ErrorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a manager or control operation: a kind (`name()`) plus the
/// human-readable message (`Display`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountsError {
    #[error("No account with id {0}")]
    NoAccount(AccountId),
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Authentication error")]
    Scripted(ErrorName),
    #[error("Cannot remove account {0}: no such account")]
    InvalidAccountId(AccountId),
}

impl AccountsError {
    pub fn name(&self) -> &str {
        match self {
            AccountsError::NoAccount(_) => ERROR_NO_ACCOUNT,
            AccountsError::PermissionDenied => ERROR_PERMISSION_DENIED,
            AccountsError::Scripted(name) => name.as_str(),
            AccountsError::InvalidAccountId(_) => ERROR_INVALID_ACCOUNT_ID,
        }
    }

    /// Kind as a client would classify it
    pub fn kind(&self) -> ErrorName {
        ErrorName::parse(self.name())
    }

    /// True for misuse of the control interface rather than a scripted or
    /// protocol-level refusal.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, AccountsError::InvalidAccountId(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_name_parse() {
        assert_eq!(ErrorName::parse(ERROR_USER_CANCELED), ErrorName::UserCanceled);
        assert_eq!(
            ErrorName::parse("org.example.Custom"),
            ErrorName::Other("org.example.Custom".into())
        );
        assert!(ERROR_NO_ACCOUNT.starts_with(ERROR_PREFIX));
        assert_eq!(ErrorName::InteractionRequired.as_str(), ERROR_INTERACTION_REQUIRED);
    }

    #[test]
    fn test_kind_and_message() {
        let err = AccountsError::NoAccount(4);
        assert_eq!(err.kind(), ErrorName::NoAccount);
        assert_eq!(err.to_string(), "No account with id 4");

        let scripted = AccountsError::Scripted(ErrorName::parse(ERROR_NO_ACCOUNT));
        assert_eq!(scripted.kind(), ErrorName::NoAccount);
        assert!(!scripted.is_programming_error());

        let fault = AccountsError::InvalidAccountId(9);
        assert_eq!(fault.name(), ERROR_INVALID_ACCOUNT_ID);
        assert!(fault.is_programming_error());
    }
}
