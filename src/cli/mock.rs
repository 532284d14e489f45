use clap::Subcommand;

use super::{parse_field, to_properties};
use crate::account::{AccountId, Value};
use crate::client::{ClientError, RpcClient};

#[derive(Subcommand)]
pub enum MockCommands {
    /// Insert an account directly
    AddAccount {
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Remove an account
    RemoveAccount { account_id: AccountId },
    /// Set the account created by the next RequestAccess (no fields: deny)
    SetAccessReply {
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Set the reply (or error) of the next Authenticate
    SetAuthReply {
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
        #[arg(long, default_value = "")]
        error: String,
    },
}

pub async fn handle_mock_command(url: String, cmd: MockCommands) -> Result<(), ClientError> {
    let client = RpcClient::new(url);

    match cmd {
        MockCommands::AddAccount { fields } => {
            let id = client.add_account(&to_properties(fields)).await?;
            println!("Account {} added", id);
        }
        MockCommands::RemoveAccount { account_id } => {
            client.remove_account(account_id).await?;
            println!("Account {} removed", account_id);
        }
        MockCommands::SetAccessReply { fields } => {
            let details = to_properties(fields);
            client.set_request_access_reply(&details).await?;
            if details.is_empty() {
                println!("RequestAccess will be denied");
            } else {
                println!("RequestAccess reply set ({} fields)", details.len());
            }
        }
        MockCommands::SetAuthReply { fields, error } => {
            client
                .set_authentication_reply(&to_properties(fields), &error)
                .await?;
            if error.is_empty() {
                println!("Authenticate reply set");
            } else {
                println!("Authenticate will fail with {}", error);
            }
        }
    }
    Ok(())
}
