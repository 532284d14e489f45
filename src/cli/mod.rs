pub mod manager;
pub mod mock;

use clap::{Parser, Subcommand};

use crate::account::{PropertyMap, Value};

pub const DEFAULT_URL: &str = "http://127.0.0.1:9000";

#[derive(Parser)]
#[command(name = "online-accounts-mock")]
#[command(about = "Scriptable online accounts manager for tests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the mock service
    Serve {
        #[arg(long, default_value = "online-accounts-mock.toml")]
        config: String,
        /// Overrides `server.rpc_port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Call the manager interface of a running mock
    Manager {
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
        #[command(subcommand)]
        cmd: manager::ManagerCommands,
    },
    /// Script a running mock through its control interface
    Mock {
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
        #[command(subcommand)]
        cmd: mock::MockCommands,
    },
}

/// Parse `key=value`. `true`/`false` become booleans, integers become
/// `Int` (or `UInt` past `i64::MAX`), everything else a string.
pub fn parse_field(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    let value = match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match (raw.parse::<i64>(), raw.parse::<u64>()) {
            (Ok(i), _) => Value::Int(i),
            (_, Ok(u)) => Value::UInt(u),
            _ => Value::Str(raw.to_string()),
        },
    };
    Ok((key.to_string(), value))
}

pub fn to_properties(fields: Vec<(String, Value)>) -> PropertyMap {
    fields.into_iter().collect()
}

pub fn print_properties(indent: &str, props: &PropertyMap) {
    for (key, value) in props {
        match serde_json::to_string(value) {
            Ok(v) => println!("{}{} = {}", indent, key, v),
            Err(_) => println!("{}{} = {:?}", indent, key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("serviceId=svc1").unwrap(),
            ("serviceId".to_string(), Value::from("svc1"))
        );
        assert_eq!(parse_field("enabled=true").unwrap().1, Value::Bool(true));
        assert_eq!(parse_field("ExpiresIn=3600").unwrap().1, Value::Int(3600));
        assert_eq!(
            parse_field("quota=18446744073709551615").unwrap().1,
            Value::UInt(u64::MAX)
        );
        assert_eq!(parse_field("url=a=b").unwrap().1, Value::from("a=b"));
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_mock_command() {
        let cli = Cli::try_parse_from([
            "online-accounts-mock",
            "mock",
            "set-auth-reply",
            "--field",
            "token=abc",
            "--error",
            "com.ubuntu.OnlineAccounts.Error.UserCanceled",
        ])
        .unwrap();
        match cli.command {
            Commands::Mock {
                url,
                cmd: mock::MockCommands::SetAuthReply { fields, error },
            } => {
                assert_eq!(url, DEFAULT_URL);
                assert_eq!(fields, vec![("token".to_string(), Value::from("abc"))]);
                assert_eq!(error, "com.ubuntu.OnlineAccounts.Error.UserCanceled");
            }
            _ => panic!("expected mock set-auth-reply"),
        }
    }
}
