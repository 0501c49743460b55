//! Order payloads and confirmations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::product::ProductType;
use crate::error::Error;

/// Contract term in months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u32")]
pub enum ContractTerm {
    Month1,
    Months12,
    Months24,
    Months36,
}

impl ContractTerm {
    pub const VALID_MONTHS: [u32; 4] = [1, 12, 24, 36];

    pub fn months(self) -> u32 {
        match self {
            ContractTerm::Month1 => 1,
            ContractTerm::Months12 => 12,
            ContractTerm::Months24 => 24,
            ContractTerm::Months36 => 36,
        }
    }
}

impl TryFrom<u32> for ContractTerm {
    type Error = Error;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        match months {
            1 => Ok(ContractTerm::Month1),
            12 => Ok(ContractTerm::Months12),
            24 => Ok(ContractTerm::Months24),
            36 => Ok(ContractTerm::Months36),
            other => Err(Error::InvalidTerm(other)),
        }
    }
}

impl From<ContractTerm> for u32 {
    fn from(term: ContractTerm) -> Self {
        term.months()
    }
}

impl fmt::Display for ContractTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.months())
    }
}

/// One element of the port order batch sent to `/v3/networkdesign/buy`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortOrder {
    #[serde(rename = "productName")]
    pub name: String,
    pub term: ContractTerm,
    pub product_type: ProductType,
    pub port_speed: u32,
    pub location_id: u32,
    /// Epoch milliseconds
    pub create_date: i64,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    pub market: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lag_port_count: Option<u32>,
    pub marketplace_visibility: bool,
}

/// Confirmation element returned for each ordered product
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderConfirmation {
    #[serde(rename = "technicalServiceUid")]
    pub technical_service_uid: String,
}

/// Envelope of the order endpoint
#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub terms: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub data: Vec<OrderConfirmation>,
}

/// Body of the typed update endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: String,
    pub cost_centre: String,
    pub marketplace_visibility: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_terms() {
        for months in ContractTerm::VALID_MONTHS {
            let term = ContractTerm::try_from(months).unwrap();
            assert_eq!(term.months(), months);
        }
    }

    #[test]
    fn test_invalid_term_rejected() {
        let err = ContractTerm::try_from(6).unwrap_err();
        assert!(matches!(err, Error::InvalidTerm(6)));
    }

    #[test]
    fn test_port_order_wire_shape() {
        let order = PortOrder {
            name: "syd-port-1".to_string(),
            term: ContractTerm::Months12,
            product_type: ProductType::Megaport,
            port_speed: 10000,
            location_id: 19,
            create_date: 1_700_000_000_000,
            is_virtual: false,
            market: "AU".to_string(),
            lag_port_count: None,
            marketplace_visibility: true,
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "productName": "syd-port-1",
                "term": 12,
                "productType": "MEGAPORT",
                "portSpeed": 10000,
                "locationId": 19,
                "createDate": 1_700_000_000_000_i64,
                "virtual": false,
                "market": "AU",
                "marketplaceVisibility": true
            })
        );
    }

    #[test]
    fn test_order_response_with_null_data() {
        let parsed: OrderResponse =
            serde_json::from_str(r#"{"message":"ok","terms":null,"data":null}"#).unwrap();
        assert!(parsed.data.is_empty());
        assert_eq!(parsed.terms, "");
    }

    #[test]
    fn test_update_wire_shape() {
        let update = ProductUpdate {
            name: "renamed".to_string(),
            cost_centre: "ops".to_string(),
            marketplace_visibility: false,
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"name": "renamed", "costCentre": "ops", "marketplaceVisibility": false})
        );
    }
}
