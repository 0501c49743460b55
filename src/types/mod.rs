//! Wire types for products and orders

mod order;
mod product;

use serde::{Deserialize, Deserializer};

pub use order::{ContractTerm, OrderConfirmation, OrderResponse, PortOrder, ProductUpdate};
pub use product::{
    Port, Product, ProductListResponse, ProductRecord, ProductResponse, ProductType,
    ProvisioningStatus,
};

/// Decode an explicit `null` as the type's default, like a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
