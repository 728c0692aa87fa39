//! In-memory order store backing the demo API

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::models::Order;

#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: Arc<RwLock<HashMap<u64, Order>>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new order, rejecting duplicate ids
    pub fn insert(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write();
        if orders.contains_key(&order.id) {
            return Err(Error::InvalidRequest(format!(
                "Order {} already exists",
                order.id
            )));
        }
        orders.insert(order.id, order);
        Ok(())
    }

    pub fn get(&self, id: u64) -> Option<Order> {
        self.orders.read().get(&id).cloned()
    }
}
