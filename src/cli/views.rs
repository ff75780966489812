//! Table rendering for the read-only projections.

use comfy_table::Cell;

use crate::cli::ui;
use crate::store::models::{Fund, FundHistory, Holding, Order};

pub fn funds_table(funds: &[Fund]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Name"),
        ui::header_cell("Ticker"),
        ui::header_cell("Description"),
        ui::header_cell("Initial Investment"),
        ui::header_cell("Shares Outstanding"),
    ]);

    for fund in funds {
        table.add_row(vec![
            ui::count_cell(fund.id),
            Cell::new(&fund.name),
            Cell::new(&fund.ticker),
            Cell::new(&fund.description),
            ui::money_cell(fund.initial_investment),
            ui::count_cell(fund.shares_outstanding),
        ]);
    }

    table.to_string()
}

pub fn holdings_table(holdings: &[Holding]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Equity Ticker"),
        ui::header_cell("Quantity"),
        ui::header_cell("Purchase Price"),
    ]);

    for holding in holdings {
        table.add_row(vec![
            Cell::new(&holding.ticker),
            ui::count_cell(holding.quantity),
            ui::money_cell(holding.purchase_price),
        ]);
    }

    table.to_string()
}

pub fn history_table(entries: &[FundHistory]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("NAV"), ui::header_cell("Date")]);

    for entry in entries {
        table.add_row(vec![
            ui::money_cell(entry.nav),
            Cell::new(entry.closing_date),
        ]);
    }

    table.to_string()
}

pub fn orders_table(orders: &[Order]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Type"),
        ui::header_cell("Price"),
        ui::header_cell("Quantity"),
        ui::header_cell("Date"),
        ui::header_cell("Transaction ID"),
    ]);

    for order in orders {
        table.add_row(vec![
            Cell::new(&order.order_type),
            ui::money_cell(order.price),
            ui::count_cell(order.quantity),
            Cell::new(order.order_date),
            Cell::new(&order.transaction_id),
        ]);
    }

    table.to_string()
}
