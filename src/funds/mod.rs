//! Fund operations: create funds, execute buy/sell orders, recompute NAV.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::info;

use crate::core::error::{Error, Result};
use crate::core::quote::QuoteProvider;
use crate::store::funds::FundRepository;
use crate::store::history::HistoryRepository;
use crate::store::holdings::HoldingRepository;
use crate::store::models::{Fund, FundHistory, Holding, NewFund, NewFundHistory, NewHolding, Order};
use crate::store::orders::OrderRepository;
use crate::store::schema::{fund_holdings, funds};
use crate::store::{DbPool, get_connection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl FromStr for OrderSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            other => Err(Error::InvalidInput(format!(
                "order type must be BUY or SELL, got '{other}'"
            ))),
        }
    }
}

impl Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A priced order awaiting operator confirmation. `symbol` is the symbol
/// echoed back by the quote service, `total` is price x quantity.
#[derive(Debug, Clone)]
pub struct OrderTicket {
    pub side: OrderSide,
    pub symbol: String,
    pub quantity: i32,
    pub price: f64,
    pub total: f64,
}

/// Result of an executed order. `gain_or_loss` is set for sells only.
#[derive(Debug, Clone)]
pub struct OrderOutcome {
    pub fund_ticker: String,
    pub gain_or_loss: Option<f64>,
}

/// Business logic composing the quote service and the persistence layer.
pub struct FundService {
    pool: Arc<DbPool>,
    quotes: Arc<dyn QuoteProvider>,
    funds: FundRepository,
    holdings: HoldingRepository,
    history: HistoryRepository,
    orders: OrderRepository,
}

impl FundService {
    pub fn new(pool: Arc<DbPool>, quotes: Arc<dyn QuoteProvider>) -> Self {
        Self {
            funds: FundRepository::new(pool.clone()),
            holdings: HoldingRepository::new(pool.clone()),
            history: HistoryRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            pool,
            quotes,
        }
    }

    pub fn create_fund(&self, new_fund: NewFund) -> Result<Fund> {
        new_fund.validate()?;
        if self.funds.find_by_ticker(&new_fund.ticker)?.is_some() {
            return Err(Error::InvalidInput(format!(
                "a fund with ticker {} already exists",
                new_fund.ticker
            )));
        }

        let fund = self.funds.insert(new_fund)?;
        info!("Created pseudo fund {} ({})", fund.name, fund.ticker);
        Ok(fund)
    }

    pub fn get_fund(&self, ticker: &str) -> Result<Fund> {
        self.funds
            .find_by_ticker(ticker)?
            .ok_or_else(|| Error::NotFound(format!("no fund with ticker {ticker}")))
    }

    pub fn list_funds(&self) -> Result<Vec<Fund>> {
        self.funds.list()
    }

    pub fn list_holdings(&self, fund_ticker: &str) -> Result<Vec<Holding>> {
        let fund = self.get_fund(fund_ticker)?;
        self.holdings.list_for_fund(fund.id)
    }

    pub fn list_history(&self, fund_ticker: &str) -> Result<Vec<FundHistory>> {
        let fund = self.get_fund(fund_ticker)?;
        self.history.list_for_fund(fund.id)
    }

    /// Trade records for a symbol, written by the trading system.
    pub fn list_trades(&self, symbol: &str) -> Result<Vec<Order>> {
        let trades = self.orders.list_by_symbol(symbol)?;
        if trades.is_empty() {
            return Err(Error::NotFound(format!(
                "no trades recorded for symbol {symbol}"
            )));
        }
        Ok(trades)
    }

    /// Prices an order against the current quote. No state is touched until
    /// the ticket is executed.
    pub async fn prepare_order(
        &self,
        symbol: &str,
        quantity: i32,
        side: OrderSide,
    ) -> Result<OrderTicket> {
        if quantity <= 0 {
            return Err(Error::InvalidInput(
                "quantity must be a positive integer".to_string(),
            ));
        }

        let quote = self.quotes.fetch_quote(symbol).await?;
        let total = quote.price * quantity as f64;
        Ok(OrderTicket {
            side,
            symbol: quote.symbol,
            quantity,
            price: quote.price,
            total,
        })
    }

    /// Applies a confirmed buy or sell. The holding mutation and the fund
    /// balance adjustment commit as a single transaction.
    pub fn execute_order(&self, fund: &Fund, ticket: &OrderTicket) -> Result<OrderOutcome> {
        let mut conn = get_connection(&self.pool)?;
        let outcome = conn.transaction::<_, Error, _>(|tx| match ticket.side {
            OrderSide::Buy => apply_buy(tx, fund, ticket),
            OrderSide::Sell => apply_sell(tx, fund, ticket),
        })?;

        info!(
            "Executed {} {} shares of {} @ {} = ${:.2} for fund {}",
            ticket.side, ticket.quantity, ticket.symbol, ticket.price, ticket.total, fund.ticker
        );
        Ok(outcome)
    }

    /// Recomputes NAV from live quotes and appends a history row dated
    /// today. `on_quote` is invoked once per distinct holding ticker.
    pub async fn update_nav(
        &self,
        fund_ticker: &str,
        on_quote: &(dyn Fn() + Send + Sync),
    ) -> Result<FundHistory> {
        let fund = self.get_fund(fund_ticker)?;
        let holdings = self.holdings.list_for_fund(fund.id)?;

        let mut prices: HashMap<String, f64> = HashMap::new();
        for holding in &holdings {
            if !prices.contains_key(&holding.ticker) {
                let quote = self.quotes.fetch_quote(&holding.ticker).await?;
                prices.insert(holding.ticker.clone(), quote.price);
                on_quote();
            }
        }

        let current_value: f64 = holdings
            .iter()
            .map(|h| prices[&h.ticker] * h.quantity as f64)
            .sum();
        let nav = current_value / fund.shares_outstanding as f64;

        let entry = self.history.append(NewFundHistory {
            fund_id: fund.id,
            nav,
            closing_date: Local::now().date_naive(),
        })?;

        info!("NAV for fund {} updated to {:.4}", fund.ticker, nav);
        Ok(entry)
    }
}

fn apply_buy(conn: &mut SqliteConnection, fund: &Fund, ticket: &OrderTicket) -> Result<OrderOutcome> {
    let new_holding = NewHolding {
        fund_id: fund.id,
        ticker: ticket.symbol.clone(),
        quantity: ticket.quantity,
        purchase_price: ticket.total,
    };
    diesel::insert_into(fund_holdings::table)
        .values(&new_holding)
        .execute(conn)?;

    diesel::update(funds::table.find(fund.id))
        .set(funds::initial_investment.eq(funds::initial_investment + ticket.total))
        .execute(conn)?;

    Ok(OrderOutcome {
        fund_ticker: fund.ticker.clone(),
        gain_or_loss: None,
    })
}

fn apply_sell(
    conn: &mut SqliteConnection,
    fund: &Fund,
    ticket: &OrderTicket,
) -> Result<OrderOutcome> {
    // Oldest lot still holding shares.
    let holding = fund_holdings::table
        .filter(fund_holdings::fund_id.eq(fund.id))
        .filter(fund_holdings::ticker.eq(&ticket.symbol))
        .filter(fund_holdings::quantity.gt(0))
        .order(fund_holdings::id.asc())
        .first::<Holding>(conn)
        .optional()?;

    let Some(holding) = holding else {
        return Err(Error::NotFound(format!(
            "fund {} holds no position in {}",
            fund.ticker, ticket.symbol
        )));
    };

    if ticket.quantity > holding.quantity {
        return Err(Error::InvalidInput(format!(
            "cannot sell {} shares of {}; only {} held",
            ticket.quantity, ticket.symbol, holding.quantity
        )));
    }

    // The lot's purchase_price is its total cost, so the basis consumed by
    // this sell is the per-share cost times the quantity sold.
    let cost_basis = holding.purchase_price / holding.quantity as f64 * ticket.quantity as f64;
    let gain_or_loss = ticket.total - cost_basis;

    diesel::update(fund_holdings::table.find(holding.id))
        .set((
            fund_holdings::quantity.eq(fund_holdings::quantity - ticket.quantity),
            fund_holdings::purchase_price.eq(fund_holdings::purchase_price - cost_basis),
        ))
        .execute(conn)?;

    diesel::update(funds::table.find(fund.id))
        .set(funds::initial_investment.eq(funds::initial_investment + gain_or_loss))
        .execute(conn)?;

    Ok(OrderOutcome {
        fund_ticker: fund.ticker.clone(),
        gain_or_loss: Some(gain_or_loss),
    })
}
