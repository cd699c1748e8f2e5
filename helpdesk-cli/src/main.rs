mod cli;
mod commands;
mod field_spec;
mod logging;

use clap::Parser;
use helpdesk_client::{ClientConfig, ClientError, HelpdeskClient};

use cli::{Cli, ConnectionArgs};

fn client_config(args: &ConnectionArgs) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &args.api_url {
        config.base_url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(timeout);
    }
    if let Some(url) = &args.form_url {
        config = config.with_form_base_url(url.clone());
    }
    if let Some(url) = &args.inventory_url {
        config = config.with_inventory_url(url.clone());
    }
    if let Some(url) = &args.asset_edit_url {
        config = config.with_asset_edit_url(url.clone());
    }
    if let Some(home) = &args.home {
        config = config.with_data_dir(home.clone());
    }
    config
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = client_config(&cli.connection);
    tracing::debug!(base_url = %config.base_url, timeout = config.timeout, "Client configured");

    let mut client = HelpdeskClient::new(config)?;
    if client.restore_session()? {
        tracing::debug!("Session restored");
    }
    commands::run(&mut client, cli.command).await
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let _guard = match logging::init(cli.verbose, cli.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: failed to initialize logging: {:#}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(cli).await {
        eprintln!("error: {:#}", e);
        if let Some(client_err) = e.downcast_ref::<ClientError>() {
            if client_err.is_retryable() {
                eprintln!("hint: the request may succeed if retried");
            } else if matches!(client_err, ClientError::NotAuthenticated | ClientError::Unauthorized(_)) {
                eprintln!("hint: run `helpdesk login` first");
            }
        }
        std::process::exit(1);
    }
}
