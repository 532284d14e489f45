use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

use online_accounts_mock::cli::{self, Cli, Commands};
use online_accounts_mock::config::MockConfig;
use online_accounts_mock::manager::Manager;
use online_accounts_mock::rpc::RpcServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG wins; otherwise the configured log level is applied once
    // the config is loaded.
    let env_filter = EnvFilter::try_from_default_env();
    let from_env = env_filter.is_ok();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|_| EnvFilter::new("info")));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port } => {
            let mut config = MockConfig::load_or_default(&config);
            if !from_env {
                filter_handle.reload(EnvFilter::new(&config.server.log_level))?;
            }
            if let Some(port) = port {
                config.server.rpc_port = port;
            }

            let mut manager = Manager::new(config.server.signal_capacity);
            manager.apply_script(&config.script);
            info!(
                accounts = manager.store().len(),
                "Online accounts mock starting"
            );

            RpcServer::new(manager, config.bind_addr()).start().await?;
        }
        Commands::Manager { url, cmd } => {
            cli::manager::handle_manager_command(url, cmd).await?;
        }
        Commands::Mock { url, cmd } => {
            cli::mock::handle_mock_command(url, cmd).await?;
        }
    }

    Ok(())
}
