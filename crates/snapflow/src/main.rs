mod menu;
mod prompt;
mod render;

use clap::Parser;
use colored::Colorize;
use snapflow_config::{Settings, platform_secret_store, resolve_token};
use snapflow_hcloud::HcloudClient;

#[derive(Parser)]
#[command(name = "snapflow")]
#[command(version)]
#[command(about = "Manage Hetzner Cloud VM snapshots from an interactive menu", long_about = None)]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    // Menus draw on stdout; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let store = platform_secret_store();
    let token = match resolve_token(store.as_deref()).await {
        Ok(token) => token,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let client = match &settings.endpoint {
        Some(endpoint) => HcloudClient::with_endpoint(token, endpoint),
        None => HcloudClient::new(token),
    };

    let mut menu = menu::Menu::new(client, store, &settings);
    menu.run().await
}
