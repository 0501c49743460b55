/// Version injected at compile time via MEGAPORT_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("MEGAPORT_VERSION") {
    Some(v) => v,
    None => "dev",
};

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use megaport::config::Settings;
use megaport::logging::{setup_logging, LogLevel};
use megaport::service::{BuyPortRequest, CancelMode, ModifyPortRequest};
use megaport::types::{ProductRecord, ProductType, ProvisioningStatus};
use megaport::{ApiKeys, Client, ClientConfig, Environment};

/// Command-line client for the Megaport API
#[derive(Parser, Debug)]
#[command(name = "megaport", version = VERSION, about, long_about = None)]
struct Args {
    /// API environment (production, staging, development)
    #[arg(short, long)]
    env: Option<Environment>,

    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Use an existing session token instead of logging in (or set MEGAPORT_SESSION_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage ports
    #[command(subcommand)]
    Ports(PortCommand),
    /// Manage products of any type
    #[command(subcommand)]
    Products(ProductCommand),
}

#[derive(Subcommand, Debug)]
enum PortCommand {
    List,
    Get {
        id: String,
    },
    Buy {
        #[arg(long)]
        name: String,
        /// Term in months (1, 12, 24 or 36)
        #[arg(long)]
        term: u32,
        /// Speed in Mbps
        #[arg(long)]
        speed: u32,
        #[arg(long)]
        location: u32,
        #[arg(long)]
        market: String,
        /// Order a LAG with this many ports
        #[arg(long)]
        lag_count: Option<u32>,
        /// Hide the port from the marketplace
        #[arg(long)]
        private: bool,
        /// Wait for the port to go live
        #[arg(long)]
        wait: bool,
    },
    Modify {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        cost_centre: String,
        #[arg(long)]
        private: bool,
    },
    Delete {
        id: String,
        /// Cancel immediately instead of at the end of the term
        #[arg(long)]
        now: bool,
    },
    Restore {
        id: String,
    },
    Lock {
        id: String,
    },
    Unlock {
        id: String,
    },
    /// Wait until the port is live
    Wait {
        id: String,
        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
enum ProductCommand {
    List,
    Get {
        id: String,
    },
    Delete {
        id: String,
        #[arg(long)]
        now: bool,
    },
    /// Wait until a product reaches a provisioning status
    Wait {
        id: String,
        /// Product type tag (MEGAPORT, MCR2, MVE, VXC)
        #[arg(long, default_value = "MEGAPORT")]
        product_type: String,
        #[arg(long, default_value = "LIVE")]
        status: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = Settings::load();

    let log_level = args
        .log_level
        .or_else(|| std::env::var("LOG_LEVEL").ok().map(|l| LogLevel::from_name(&l)))
        .or_else(|| settings.log_level.as_deref().map(LogLevel::from_name))
        .unwrap_or(LogLevel::Off);
    let _log_guard = setup_logging(log_level);

    let environment = settings.effective_environment(args.env);
    if settings.remember(args.env, args.log_level.map(LogLevel::name)) {
        if let Err(e) = settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    let mut config = ClientConfig::for_environment(environment)?;
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url)?;
    }
    tracing::info!("Using environment {:?} at {}", environment, config.base_url);

    let client = Client::new(config).context("Failed to create API client")?;
    let token = args
        .token
        .clone()
        .or_else(|| std::env::var("MEGAPORT_SESSION_TOKEN").ok());
    match token {
        Some(token) => client.set_session_token(token).await,
        None => {
            let keys = ApiKeys::from_env()?;
            client.login_oauth(&keys).await.context("Login failed")?;
        }
    }

    match args.command {
        Command::Ports(cmd) => run_port_command(&client, cmd, args.output).await,
        Command::Products(cmd) => run_product_command(&client, cmd, args.output).await,
    }
}

async fn run_port_command(client: &Client, cmd: PortCommand, output: OutputFormat) -> Result<()> {
    let ports = client.ports();

    match cmd {
        PortCommand::List => print(&ports.list_ports().await?, output),
        PortCommand::Get { id } => print(&ports.get_port(&id).await?, output),
        PortCommand::Buy {
            name,
            term,
            speed,
            location,
            market,
            lag_count,
            private,
            wait,
        } => {
            let confirmation = ports
                .buy_port(&BuyPortRequest {
                    name,
                    term,
                    port_speed: speed,
                    location_id: location,
                    market,
                    is_lag: lag_count.is_some(),
                    lag_count: lag_count.unwrap_or_default(),
                    is_private: private,
                })
                .await
                .context("Port order failed")?;

            let uid = confirmation.technical_service_uid;
            println!("{}", uid);

            if wait {
                ports.wait_for_port_provisioning(&uid).await?;
                print(&ports.get_port(&uid).await?, output)?;
            }
            Ok(())
        }
        PortCommand::Modify {
            id,
            name,
            cost_centre,
            private,
        } => {
            ports
                .modify_port(&ModifyPortRequest {
                    port_id: id,
                    name,
                    marketplace_visibility: !private,
                    cost_centre,
                })
                .await?;
            Ok(())
        }
        PortCommand::Delete { id, now } => Ok(ports.delete_port(&id, now).await?),
        PortCommand::Restore { id } => Ok(ports.restore_port(&id).await?),
        PortCommand::Lock { id } => Ok(ports.lock_port(&id).await?),
        PortCommand::Unlock { id } => Ok(ports.unlock_port(&id).await?),
        PortCommand::Wait { id, timeout } => {
            let mut wait = client.config.wait;
            if let Some(secs) = timeout {
                wait = wait.with_deadline(Duration::from_secs(secs));
            }
            let waiting = Client {
                config: client.config.clone().with_wait(wait),
                ..client.clone()
            };
            waiting.ports().wait_for_port_provisioning(&id).await?;
            println!("{} is live", id);
            Ok(())
        }
    }
}

async fn run_product_command(
    client: &Client,
    cmd: ProductCommand,
    output: OutputFormat,
) -> Result<()> {
    let products = client.products();

    match cmd {
        ProductCommand::List => {
            let records = products.list_products().await?;
            let total = records.len();

            let mut values = Vec::with_capacity(total);
            for record in records {
                match record {
                    ProductRecord::Port(port) => values.push(serde_json::to_value(port)?),
                    ProductRecord::Product(product) => values.push(serde_json::to_value(product)?),
                    ProductRecord::Unrecognized { .. } => {}
                }
            }

            if values.len() < total {
                eprintln!("{} product(s) could not be decoded", total - values.len());
            }
            print(&values, output)
        }
        ProductCommand::Get { id } => print(&products.get_product(&id).await?, output),
        ProductCommand::Delete { id, now } => {
            Ok(products.delete_product(&id, CancelMode::from_delete_now(now)).await?)
        }
        ProductCommand::Wait {
            id,
            product_type,
            status,
        } => {
            let family = ProductType::from(product_type);
            let expected = ProvisioningStatus::from(status);
            products.wait_until_live(&id, family, &expected).await?;
            println!("{} is {}", id, expected);
            Ok(())
        }
    }
}

fn print<T: Serialize>(value: &T, output: OutputFormat) -> Result<()> {
    let rendered = match output {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered);
    Ok(())
}
