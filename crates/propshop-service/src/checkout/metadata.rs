//! Metadata echoed through the payment provider.
//!
//! Values are strings on the provider side; line items travel as a compact
//! JSON array.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use propshop_core::error::AppError;
use propshop_core::result::AppResult;
use propshop_entity::order::OrderLine;

const USER_ID: &str = "user_id";
const ITEMS: &str = "items";
const DELIVERY_FEE: &str = "deliveryFee";
const TOTAL_PRICE: &str = "total_price";

/// Order details attached to a checkout session.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutMetadata {
    /// Purchasing user.
    pub user_id: Uuid,
    /// Lines as submitted at session creation.
    pub items: Vec<OrderLine>,
    /// Delivery fee.
    pub delivery_fee: Decimal,
    /// Server-verified total.
    pub total_price: Decimal,
}

impl CheckoutMetadata {
    /// Encode as provider metadata.
    pub fn to_map(&self) -> AppResult<BTreeMap<String, String>> {
        Ok(BTreeMap::from([
            (USER_ID.to_string(), self.user_id.to_string()),
            (ITEMS.to_string(), serde_json::to_string(&self.items)?),
            (DELIVERY_FEE.to_string(), self.delivery_fee.to_string()),
            (TOTAL_PRICE.to_string(), self.total_price.to_string()),
        ]))
    }

    /// Decode provider metadata.
    pub fn from_map(map: &BTreeMap<String, String>) -> AppResult<Self> {
        let field = |key: &str| {
            map.get(key)
                .ok_or_else(|| AppError::validation(format!("Checkout metadata missing '{key}'")))
        };
        let decimal = |key: &str| -> AppResult<Decimal> {
            let raw = field(key)?;
            Decimal::from_str(raw)
                .map_err(|_| AppError::validation(format!("Checkout metadata '{key}' is not a number")))
        };

        let user_id = Uuid::parse_str(field(USER_ID)?)
            .map_err(|_| AppError::validation("Checkout metadata 'user_id' is not a UUID"))?;
        let items: Vec<OrderLine> = serde_json::from_str(field(ITEMS)?)?;
        if items.is_empty() {
            return Err(AppError::validation("Checkout metadata has no items"));
        }

        Ok(Self {
            user_id,
            items,
            delivery_fee: decimal(DELIVERY_FEE)?,
            total_price: decimal(TOTAL_PRICE)?,
        })
    }

    /// User id recorded on a session, if parseable.
    pub fn owner_of(map: &BTreeMap<String, String>) -> Option<Uuid> {
        map.get(USER_ID).and_then(|id| Uuid::parse_str(id).ok())
    }
}

#[cfg(test)]
mod tests {
    use propshop_entity::order::FulfillmentType;

    use super::*;

    #[test]
    fn test_metadata_uses_provider_keys() {
        let meta = CheckoutMetadata {
            user_id: Uuid::new_v4(),
            items: vec![OrderLine {
                prop_id: Uuid::new_v4(),
                quantity: 2,
                fulfillment_type: FulfillmentType::Rental,
                rental_days: Some(3),
            }],
            delivery_fee: Decimal::from(10),
            total_price: Decimal::new(2510, 1),
        };
        let map = meta.to_map().unwrap();
        assert_eq!(map["deliveryFee"], "10");
        assert_eq!(map["total_price"], "251.0");
        assert!(map["items"].contains("\"type\":\"rental\""));
        assert_eq!(CheckoutMetadata::from_map(&map).unwrap(), meta);
        assert_eq!(CheckoutMetadata::owner_of(&map), Some(meta.user_id));
    }

    #[test]
    fn test_missing_field_rejected() {
        let map = BTreeMap::from([("user_id".to_string(), Uuid::nil().to_string())]);
        assert!(CheckoutMetadata::from_map(&map).is_err());
    }
}
