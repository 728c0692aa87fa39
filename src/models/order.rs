//! Order model served by the demo API

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
    pub unit_price_cents: u64,
}

/// Order payload accepted by the demo API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Order {
    /// Sum of all line totals in cents
    pub fn compute_total(&self) -> Result<u64> {
        self.items.iter().try_fold(0u64, |total, item| {
            if item.quantity == 0 {
                return Err(Error::InvalidRequest(format!(
                    "Line {} has zero quantity",
                    item.sku
                )));
            }
            item.unit_price_cents
                .checked_mul(u64::from(item.quantity))
                .and_then(|line| total.checked_add(line))
                .ok_or_else(|| Error::InvalidRequest("Order total overflows".to_string()))
        })
    }
}
