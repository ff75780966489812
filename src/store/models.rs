use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// A pseudo fund. `initial_investment` is a running total adjusted by every
/// buy and sell; `shares_outstanding` is fixed at creation.
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::store::schema::funds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Fund {
    pub id: i32,
    pub name: String,
    pub ticker: String,
    pub description: String,
    pub initial_investment: f64,
    pub shares_outstanding: i32,
}

/// Input model for creating a fund.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::store::schema::funds)]
pub struct NewFund {
    pub name: String,
    pub ticker: String,
    pub description: String,
    pub initial_investment: f64,
    pub shares_outstanding: i32,
}

impl NewFund {
    pub fn new(name: String, ticker: String, description: String, shares_outstanding: i32) -> Self {
        NewFund {
            name,
            ticker,
            description,
            initial_investment: 0.0,
            shares_outstanding,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("fund name cannot be empty".to_string()));
        }
        if self.ticker.trim().is_empty() {
            return Err(Error::InvalidInput(
                "fund ticker cannot be empty".to_string(),
            ));
        }
        if self.shares_outstanding <= 0 {
            return Err(Error::InvalidInput(
                "shares outstanding must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// One position a fund holds in an underlying security. `purchase_price` is
/// the total cost paid for the lot, not a per-share price.
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::store::schema::fund_holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Holding {
    pub id: i32,
    pub fund_id: i32,
    pub ticker: String,
    pub quantity: i32,
    pub purchase_price: f64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::store::schema::fund_holdings)]
pub struct NewHolding {
    pub fund_id: i32,
    pub ticker: String,
    pub quantity: i32,
    pub purchase_price: f64,
}

/// Append-only NAV record written by the NAV update operation.
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::store::schema::fund_histories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FundHistory {
    pub id: i32,
    pub fund_id: i32,
    pub nav: f64,
    pub closing_date: NaiveDate,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::store::schema::fund_histories)]
pub struct NewFundHistory {
    pub fund_id: i32,
    pub nav: f64,
    pub closing_date: NaiveDate,
}

/// A trade record written by the trading system. Read-only for the console.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::store::schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Order {
    pub id: i32,
    pub symbol: String,
    pub order_type: String,
    pub price: f64,
    pub quantity: i32,
    pub order_date: NaiveDateTime,
    pub transaction_id: String,
}
