//! Port operations
//!
//! Ordering, listing and lifecycle management of ports. Most verbs delegate
//! to [`ProductService`] with the port product type filled in.

use chrono::Utc;
use reqwest::{Method, StatusCode};

use super::product::{CancelMode, ModifyProductRequest, ModifyProductResponse, ProductService};
use crate::client::{segment, Client};
use crate::error::{Error, Result};
use crate::types::{
    ContractTerm, OrderConfirmation, OrderResponse, Port, PortOrder, ProductRecord,
    ProductResponse, ProductType, ProvisioningStatus,
};

/// Order for a single port or a LAG
#[derive(Debug, Clone)]
pub struct BuyPortRequest {
    pub name: String,
    /// Term in months; must be 1, 12, 24 or 36
    pub term: u32,
    pub port_speed: u32,
    pub location_id: u32,
    pub market: String,
    pub is_lag: bool,
    pub lag_count: u32,
    /// Hide the port from the marketplace
    pub is_private: bool,
}

#[derive(Debug, Clone)]
pub struct BuySinglePortRequest {
    pub name: String,
    pub term: u32,
    pub port_speed: u32,
    pub location_id: u32,
    pub market: String,
    pub is_private: bool,
}

#[derive(Debug, Clone)]
pub struct BuyLagPortRequest {
    pub name: String,
    pub term: u32,
    pub port_speed: u32,
    pub location_id: u32,
    pub market: String,
    pub lag_count: u32,
    pub is_private: bool,
}

#[derive(Debug, Clone)]
pub struct ModifyPortRequest {
    pub port_id: String,
    pub name: String,
    pub marketplace_visibility: bool,
    pub cost_centre: String,
}

#[derive(Clone, Copy, Debug)]
pub struct PortService<'a> {
    client: &'a Client,
}

impl<'a> PortService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn products(&self) -> ProductService<'a> {
        ProductService::new(self.client)
    }

    /// Order a port. The term is checked before anything is sent.
    pub async fn buy_port(&self, req: &BuyPortRequest) -> Result<OrderConfirmation> {
        let term = ContractTerm::try_from(req.term)?;

        let order = PortOrder {
            name: req.name.clone(),
            term,
            product_type: ProductType::Megaport,
            port_speed: req.port_speed,
            location_id: req.location_id,
            create_date: Utc::now().timestamp_millis(),
            is_virtual: false,
            market: req.market.clone(),
            lag_port_count: req.is_lag.then_some(req.lag_count),
            marketplace_visibility: !req.is_private,
        };

        let body = self.products().execute_order(&[order]).await?;
        let parsed: OrderResponse = serde_json::from_slice(&body)?;

        let confirmation = parsed
            .data
            .into_iter()
            .next()
            .filter(|c| !c.technical_service_uid.is_empty())
            .ok_or(Error::EmptyOrderResponse)?;

        tracing::info!(
            "Ordered port {} ({})",
            req.name,
            confirmation.technical_service_uid
        );
        Ok(confirmation)
    }

    pub async fn buy_single_port(&self, req: &BuySinglePortRequest) -> Result<OrderConfirmation> {
        self.buy_port(&BuyPortRequest {
            name: req.name.clone(),
            term: req.term,
            port_speed: req.port_speed,
            location_id: req.location_id,
            market: req.market.clone(),
            is_lag: false,
            lag_count: 0,
            is_private: req.is_private,
        })
        .await
    }

    pub async fn buy_lag_port(&self, req: &BuyLagPortRequest) -> Result<OrderConfirmation> {
        self.buy_port(&BuyPortRequest {
            name: req.name.clone(),
            term: req.term,
            port_speed: req.port_speed,
            location_id: req.location_id,
            market: req.market.clone(),
            is_lag: true,
            lag_count: req.lag_count,
            is_private: req.is_private,
        })
        .await
    }

    /// Ports on the account. Products of other families, and elements that
    /// do not decode as ports, are left out.
    pub async fn list_ports(&self) -> Result<Vec<Port>> {
        let records = self.products().list_products().await?;
        let total = records.len();

        let ports: Vec<Port> = records
            .into_iter()
            .filter_map(ProductRecord::into_port)
            .collect();

        tracing::debug!("Listed {} ports out of {} products", ports.len(), total);
        Ok(ports)
    }

    pub async fn get_port(&self, port_id: &str) -> Result<Port> {
        let path = format!("/v2/product/{}", segment(port_id));
        let response = self
            .client
            .request(Method::GET, &path, None, StatusCode::OK)
            .await?;
        let parsed: ProductResponse<Port> = response.json()?;
        Ok(parsed.data)
    }

    pub async fn modify_port(&self, req: &ModifyPortRequest) -> Result<ModifyProductResponse> {
        self.products()
            .modify_product(&ModifyProductRequest {
                product_id: req.port_id.clone(),
                product_type: ProductType::Megaport,
                name: req.name.clone(),
                cost_centre: req.cost_centre.clone(),
                marketplace_visibility: req.marketplace_visibility,
            })
            .await
    }

    /// Cancel a port, immediately when `delete_now` is set
    pub async fn delete_port(&self, port_id: &str, delete_now: bool) -> Result<()> {
        self.products()
            .delete_product(port_id, CancelMode::from_delete_now(delete_now))
            .await
    }

    pub async fn restore_port(&self, port_id: &str) -> Result<()> {
        self.products().restore_product(port_id).await
    }

    pub async fn lock_port(&self, port_id: &str) -> Result<()> {
        self.products().lock_product(port_id).await
    }

    pub async fn unlock_port(&self, port_id: &str) -> Result<()> {
        self.products().unlock_product(port_id).await
    }

    /// Wait for a port to go live, using the client's wait options
    pub async fn wait_for_port_provisioning(&self, port_id: &str) -> Result<bool> {
        self.products()
            .wait_until_live(port_id, ProductType::Megaport, &ProvisioningStatus::Live)
            .await
    }
}
