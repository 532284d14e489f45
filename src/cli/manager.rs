use clap::Subcommand;

use super::{parse_field, print_properties, to_properties};
use crate::account::{AccountId, PropertyMap, Value};
use crate::client::{ClientError, RpcClient};

#[derive(Subcommand)]
pub enum ManagerCommands {
    /// List all accounts
    Accounts,
    /// Create an account from the scripted template and authenticate it
    RequestAccess {
        #[arg(long)]
        service: String,
        #[arg(long = "param", value_parser = parse_field)]
        params: Vec<(String, Value)>,
    },
    /// Authenticate an existing account
    Authenticate {
        account_id: AccountId,
        #[arg(long)]
        service: String,
        #[arg(long)]
        interactive: bool,
        #[arg(long)]
        invalidate: bool,
        #[arg(long = "param", value_parser = parse_field)]
        params: Vec<(String, Value)>,
    },
}

pub async fn handle_manager_command(url: String, cmd: ManagerCommands) -> Result<(), ClientError> {
    let client = RpcClient::new(url);

    match cmd {
        ManagerCommands::Accounts => {
            let accounts = client.get_accounts(&PropertyMap::new()).await?;
            println!("Accounts ({}):", accounts.len());
            for (id, details) in accounts {
                println!(" - {}", id);
                print_properties("     ", &details);
            }
        }
        ManagerCommands::RequestAccess { service, params } => {
            let grant = client
                .request_access(&service, &to_properties(params))
                .await?;
            let (id, details) = grant.account;
            println!("Account {} created:", id);
            print_properties("   ", &details);
            println!("Authentication:");
            print_properties("   ", &grant.authentication);
        }
        ManagerCommands::Authenticate {
            account_id,
            service,
            interactive,
            invalidate,
            params,
        } => {
            let reply = client
                .authenticate(
                    account_id,
                    &service,
                    interactive,
                    invalidate,
                    &to_properties(params),
                )
                .await?;
            println!("Authentication:");
            print_properties("   ", &reply);
        }
    }
    Ok(())
}
