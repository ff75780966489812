use diesel::prelude::*;
use std::sync::Arc;

use crate::core::error::Result;
use crate::store::models::Order;
use crate::store::schema::orders::dsl;
use crate::store::{DbPool, get_connection};

/// Read-only repository over trade records written by the trading system.
pub struct OrderRepository {
    pool: Arc<DbPool>,
}

impl OrderRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub fn list_by_symbol(&self, order_symbol: &str) -> Result<Vec<Order>> {
        let mut conn = get_connection(&self.pool)?;
        let all = dsl::orders
            .filter(dsl::symbol.eq(order_symbol))
            .order(dsl::order_date.asc())
            .load::<Order>(&mut conn)?;
        Ok(all)
    }
}
