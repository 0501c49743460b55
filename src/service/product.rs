//! Product operations
//!
//! Verbs shared by every product family: order execution, listing,
//! reads, updates, cancellation, restore and lock management.

use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::client::{segment, Client};
use crate::error::{Error, Result};
use crate::types::{
    Product, ProductListResponse, ProductRecord, ProductResponse, ProductType, ProductUpdate,
    ProvisioningStatus,
};
use crate::watch::wait_until;

const ORDER_PATH: &str = "/v3/networkdesign/buy";
const PRODUCTS_PATH: &str = "/v2/products";

/// Fields that can be changed on an existing port or MCR
#[derive(Debug, Clone)]
pub struct ModifyProductRequest {
    pub product_id: String,
    pub product_type: ProductType,
    pub name: String,
    pub cost_centre: String,
    pub marketplace_visibility: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifyProductResponse {
    pub is_updated: bool,
}

/// Cancellation mode, mapped to the action token sent to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelMode {
    /// Cancel at the end of the current term
    Scheduled,
    /// Cancel right away
    Immediate,
}

impl CancelMode {
    pub fn from_delete_now(delete_now: bool) -> Self {
        if delete_now {
            CancelMode::Immediate
        } else {
            CancelMode::Scheduled
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            CancelMode::Scheduled => "CANCEL",
            CancelMode::Immediate => "CANCEL_NOW",
        }
    }
}

/// Path of the cancel action for a product
pub fn cancel_path(product_id: &str, mode: CancelMode) -> String {
    format!("/v3/product/{}/action/{}", segment(product_id), mode.action())
}

/// Operations on the generic product abstraction
#[derive(Clone, Copy, Debug)]
pub struct ProductService<'a> {
    client: &'a Client,
}

impl<'a> ProductService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Submit an order batch and return the raw response body.
    ///
    /// The API takes an array even when a single product is ordered.
    pub async fn execute_order<T: Serialize>(&self, orders: &[T]) -> Result<Vec<u8>> {
        let body = serde_json::to_vec(orders)?;
        let response = self
            .client
            .request(Method::POST, ORDER_PATH, Some(body), StatusCode::OK)
            .await?;

        tracing::debug!(
            "Executed product order of {} item(s), status {}",
            orders.len(),
            response.status
        );
        Ok(response.body)
    }

    /// All products visible to the account.
    ///
    /// Elements that do not decode as their tagged family come back as
    /// [`ProductRecord::Unrecognized`] instead of failing the call.
    pub async fn list_products(&self) -> Result<Vec<ProductRecord>> {
        let response = self
            .client
            .request(Method::GET, PRODUCTS_PATH, None, StatusCode::OK)
            .await?;
        let parsed: ProductListResponse = response.json()?;

        let records: Vec<ProductRecord> = parsed
            .data
            .iter()
            .map(|raw| ProductRecord::decode(raw))
            .inspect(|record| {
                if let ProductRecord::Unrecognized {
                    product_type,
                    reason,
                } = record
                {
                    tracing::debug!(
                        "Skipping list element of type {:?}: {}",
                        product_type,
                        reason
                    );
                }
            })
            .collect();

        Ok(records)
    }

    /// Fetch a single product by id
    pub async fn get_product(&self, product_id: &str) -> Result<Product> {
        let path = format!("/v2/product/{}", segment(product_id));
        let response = self
            .client
            .request(Method::GET, &path, None, StatusCode::OK)
            .await?;
        let parsed: ProductResponse<Product> = response.json()?;
        Ok(parsed.data)
    }

    /// Update name, cost centre and marketplace visibility of a port or MCR
    pub async fn modify_product(&self, req: &ModifyProductRequest) -> Result<ModifyProductResponse> {
        if !req.product_type.is_modifiable() {
            return Err(Error::WrongProductModify(req.product_type.clone()));
        }

        let update = ProductUpdate {
            name: req.name.clone(),
            cost_centre: req.cost_centre.clone(),
            marketplace_visibility: req.marketplace_visibility,
        };
        let path = format!(
            "/v2/product/{}/{}",
            req.product_type.path_segment(),
            segment(&req.product_id)
        );
        let body = serde_json::to_vec(&update)?;

        self.client
            .request(Method::PUT, &path, Some(body), StatusCode::OK)
            .await?;

        Ok(ModifyProductResponse { is_updated: true })
    }

    /// Schedule a product for cancellation, or cancel it now
    pub async fn delete_product(&self, product_id: &str, mode: CancelMode) -> Result<()> {
        let path = cancel_path(product_id, mode);
        self.client
            .request(Method::DELETE, &path, None, StatusCode::OK)
            .await?;
        tracing::info!("Product {} cancellation requested ({})", product_id, mode.action());
        Ok(())
    }

    /// Undo a scheduled cancellation
    pub async fn restore_product(&self, product_id: &str) -> Result<()> {
        let path = format!("/v3/product/{}/action/UN_CANCEL", segment(product_id));
        self.client
            .request(Method::POST, &path, None, StatusCode::OK)
            .await?;
        Ok(())
    }

    /// Set or clear the lock, without checking the current state
    pub async fn manage_product_lock(&self, product_id: &str, should_lock: bool) -> Result<()> {
        let method = if should_lock {
            Method::POST
        } else {
            Method::DELETE
        };
        let path = format!("/v2/product/{}/lock", segment(product_id));
        self.client
            .request(method, &path, None, StatusCode::OK)
            .await?;
        Ok(())
    }

    /// Lock a product. Fails without a mutating call when it is already locked.
    pub async fn lock_product(&self, product_id: &str) -> Result<()> {
        let product = self.get_product(product_id).await?;
        if product.locked {
            return Err(Error::AlreadyLocked {
                family: product.product_type,
                product_id: product_id.to_string(),
            });
        }
        self.manage_product_lock(product_id, true).await
    }

    /// Unlock a product. Fails without a mutating call when it is not locked.
    pub async fn unlock_product(&self, product_id: &str) -> Result<()> {
        let product = self.get_product(product_id).await?;
        if !product.locked {
            return Err(Error::NotLocked {
                family: product.product_type,
                product_id: product_id.to_string(),
            });
        }
        self.manage_product_lock(product_id, false).await
    }

    /// Poll the product until its provisioning status equals `expected`.
    ///
    /// Uses the client's [`crate::watch::WaitOptions`]; see [`wait_until`].
    /// Returns `Ok(true)` once the status matches.
    pub async fn wait_until_live(
        &self,
        product_id: &str,
        family: ProductType,
        expected: &ProvisioningStatus,
    ) -> Result<bool> {
        let svc = *self;
        wait_until(product_id, family, expected, self.client.config.wait, move || async move {
            Ok::<_, Error>(svc.get_product(product_id).await?.provisioning_status)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_paths() {
        assert_eq!(
            cancel_path("abc", CancelMode::from_delete_now(true)),
            "/v3/product/abc/action/CANCEL_NOW"
        );
        assert_eq!(
            cancel_path("abc", CancelMode::from_delete_now(false)),
            "/v3/product/abc/action/CANCEL"
        );
    }
}
