//! Product model
//!
//! Every provisionable resource is a product: a shared set of fields
//! (id, name, type tag, provisioning status, lock state) plus whatever
//! the family adds. Ports are the family modelled in full here; the other
//! families decode into the shared [`Product`] shape.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Product family tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    /// A physical port
    Megaport,
    Mcr,
    Mve,
    Vxc,
    Ix,
    /// A tag this client does not know, kept verbatim
    Other(String),
}

impl ProductType {
    /// Tag as sent in request and response bodies
    pub fn as_tag(&self) -> &str {
        match self {
            ProductType::Megaport => "MEGAPORT",
            ProductType::Mcr => "MCR2",
            ProductType::Mve => "MVE",
            ProductType::Vxc => "VXC",
            ProductType::Ix => "IX",
            ProductType::Other(tag) => tag,
        }
    }

    /// Path segment used by the typed update endpoint
    pub fn path_segment(&self) -> String {
        self.as_tag().to_lowercase()
    }

    /// Only ports and MCRs accept name/cost centre/visibility updates
    pub fn is_modifiable(&self) -> bool {
        matches!(self, ProductType::Megaport | ProductType::Mcr)
    }
}

impl From<String> for ProductType {
    fn from(tag: String) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "MEGAPORT" => ProductType::Megaport,
            "MCR2" | "MCR" => ProductType::Mcr,
            "MVE" => ProductType::Mve,
            "VXC" => ProductType::Vxc,
            "IX" => ProductType::Ix,
            _ => ProductType::Other(tag),
        }
    }
}

impl From<&str> for ProductType {
    fn from(tag: &str) -> Self {
        ProductType::from(tag.to_string())
    }
}

impl From<ProductType> for String {
    fn from(value: ProductType) -> Self {
        value.as_tag().to_string()
    }
}

impl fmt::Display for ProductType {
    /// Human family name, as used in error messages
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Megaport => write!(f, "port"),
            ProductType::Mcr => write!(f, "MCR"),
            ProductType::Mve => write!(f, "MVE"),
            ProductType::Vxc => write!(f, "VXC"),
            ProductType::Ix => write!(f, "IX"),
            ProductType::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// Server-side lifecycle state of a product
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProvisioningStatus {
    New,
    Design,
    Deployable,
    Configured,
    Live,
    Cancelled,
    CancelledParent,
    Decommissioned,
    Other(String),
}

impl ProvisioningStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProvisioningStatus::New => "NEW",
            ProvisioningStatus::Design => "DESIGN",
            ProvisioningStatus::Deployable => "DEPLOYABLE",
            ProvisioningStatus::Configured => "CONFIGURED",
            ProvisioningStatus::Live => "LIVE",
            ProvisioningStatus::Cancelled => "CANCELLED",
            ProvisioningStatus::CancelledParent => "CANCELLED_PARENT",
            ProvisioningStatus::Decommissioned => "DECOMMISSIONED",
            ProvisioningStatus::Other(s) => s,
        }
    }

    /// No further transition is expected from this state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProvisioningStatus::Live
                | ProvisioningStatus::Cancelled
                | ProvisioningStatus::CancelledParent
                | ProvisioningStatus::Decommissioned
        )
    }
}

impl From<String> for ProvisioningStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "NEW" => ProvisioningStatus::New,
            "DESIGN" => ProvisioningStatus::Design,
            "DEPLOYABLE" => ProvisioningStatus::Deployable,
            "CONFIGURED" => ProvisioningStatus::Configured,
            "LIVE" => ProvisioningStatus::Live,
            "CANCELLED" => ProvisioningStatus::Cancelled,
            "CANCELLED_PARENT" => ProvisioningStatus::CancelledParent,
            "DECOMMISSIONED" => ProvisioningStatus::Decommissioned,
            _ => ProvisioningStatus::Other(s),
        }
    }
}

impl From<ProvisioningStatus> for String {
    fn from(value: ProvisioningStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ProvisioningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every product family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_uid: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub product_name: String,
    pub product_type: ProductType,
    pub provisioning_status: ProvisioningStatus,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub locked: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub admin_locked: bool,
    #[serde(default)]
    pub cost_centre: Option<String>,
}

/// A port product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    #[serde(flatten)]
    pub product: Product,
    pub port_speed: u32,
    #[serde(default)]
    pub location_id: Option<u32>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub marketplace_visibility: bool,
    #[serde(default)]
    pub contract_term_months: Option<u32>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub lag_primary: bool,
    #[serde(default)]
    pub lag_id: Option<u64>,
    #[serde(default, rename = "virtual", deserialize_with = "super::null_as_default")]
    pub is_virtual: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub vxc_permitted: bool,
    /// Creation time in epoch milliseconds
    #[serde(default)]
    pub create_date: Option<i64>,
}

impl Port {
    pub fn uid(&self) -> &str {
        &self.product.product_uid
    }
}

/// Element of a heterogeneous product list
#[derive(Debug, Clone, PartialEq)]
pub enum ProductRecord {
    Port(Port),
    /// A known, non-port family decoded into the shared shape
    Product(Product),
    /// Anything that did not decode as its tagged family
    Unrecognized {
        product_type: Option<String>,
        reason: String,
    },
}

impl ProductRecord {
    pub fn into_port(self) -> Option<Port> {
        match self {
            ProductRecord::Port(port) => Some(port),
            _ => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ProductRecord::Unrecognized { .. })
    }

    /// Decode one list element, choosing the typed decoder from its `productType` tag
    pub fn decode(raw: &RawValue) -> Self {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Tag {
            #[serde(default)]
            product_type: Option<String>,
        }

        let tag = match serde_json::from_str::<Tag>(raw.get()) {
            Ok(tag) => tag.product_type,
            Err(e) => {
                return ProductRecord::Unrecognized {
                    product_type: None,
                    reason: e.to_string(),
                }
            }
        };

        let Some(tag) = tag else {
            return ProductRecord::Unrecognized {
                product_type: None,
                reason: "missing productType".to_string(),
            };
        };

        match ProductType::from(tag.as_str()) {
            ProductType::Megaport => decode_as(raw, &tag, ProductRecord::Port),
            ProductType::Other(_) => ProductRecord::Unrecognized {
                product_type: Some(tag),
                reason: "unknown product type".to_string(),
            },
            _ => decode_as(raw, &tag, ProductRecord::Product),
        }
    }
}

fn decode_as<T, F>(raw: &RawValue, tag: &str, wrap: F) -> ProductRecord
where
    T: DeserializeOwned,
    F: FnOnce(T) -> ProductRecord,
{
    match serde_json::from_str::<T>(raw.get()) {
        Ok(value) => wrap(value),
        Err(e) => ProductRecord::Unrecognized {
            product_type: Some(tag.to_string()),
            reason: e.to_string(),
        },
    }
}

/// List envelope: `{message, terms, data: [...]}` with heterogeneous elements
#[derive(Debug, Deserialize)]
pub struct ProductListResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub terms: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub data: Vec<Box<RawValue>>,
}

/// Single object envelope: `{data: {...}}`
#[derive(Debug, Deserialize)]
pub struct ProductResponse<T> {
    pub data: T,
}
