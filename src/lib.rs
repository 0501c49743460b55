//! Megaport API client
//!
//! Orders and manages network products (ports, MCRs, MVEs, VXCs) through
//! the Megaport REST API. Products are provisioned asynchronously: an order
//! returns a service id right away and the product then moves through
//! provisioning states, which [`watch`] can poll until it goes live.
//!
//! # Module Structure
//!
//! - [`client`] - session credential, request executor, response classifier
//! - [`service`] - product and port operations
//! - [`watch`] - provisioning watcher
//! - [`types`] - product, order and envelope types
//! - [`config`] - environments, client configuration, persisted settings
//! - [`logging`] - log file setup for binaries
//!
//! # Example
//!
//! ```ignore
//! use megaport::{ApiKeys, Client, ClientConfig, Environment};
//! use megaport::service::BuySinglePortRequest;
//!
//! async fn order_port() -> megaport::Result<()> {
//!     let client = Client::new(ClientConfig::for_environment(Environment::Staging)?)?;
//!     client.login_oauth(&ApiKeys::from_env()?).await?;
//!
//!     let ports = client.ports();
//!     let order = ports
//!         .buy_single_port(&BuySinglePortRequest {
//!             name: "syd-port-1".to_string(),
//!             term: 12,
//!             port_speed: 10000,
//!             location_id: 19,
//!             market: "AU".to_string(),
//!             is_private: true,
//!         })
//!         .await?;
//!     ports.wait_for_port_provisioning(&order.technical_service_uid).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;
pub mod types;
pub mod watch;

pub use client::Client;
pub use config::{ApiKeys, ClientConfig, Environment};
pub use error::{ApiError, Error, FieldError, Result};
pub use watch::WaitOptions;
