//! The interactive operator menu. One plain loop: show the options, read a
//! selection, run the operation, pause, repeat until EXIT.

use std::collections::HashSet;
use std::io::BufRead;

use tracing::debug;

use crate::cli::{prompt, ui, views};
use crate::core::error::Result;
use crate::funds::{FundService, OrderSide};
use crate::store::models::NewFund;

const MENU: &str = "\
===========================================
PSEUDO MARKETS FUND MANAGER CONSOLE
===========================================
1. VIEW PSEUDO FUNDS
2. CREATE PSEUDO FUND
3. UPDATE FUND SECURITIES
4. VIEW FUND SECURITIES
5. VIEW FUND HISTORY
6. VIEW FUND TRADES
7. UPDATE FUND NAV
8. EXIT";

pub async fn run(service: &FundService, input: &mut impl BufRead) -> anyhow::Result<()> {
    loop {
        println!("{MENU}");
        let selection = match prompt::read_line(input, "Enter selection: ") {
            Ok(selection) => selection,
            Err(e) => {
                // Input is gone (ctrl-d or a drained script): leave cleanly.
                debug!("Console input closed: {e}");
                return Ok(());
            }
        };

        let result = match selection.as_str() {
            "1" => view_funds(service),
            "2" => create_fund(service, input),
            "3" => update_securities(service, input).await,
            "4" => view_securities(service, input),
            "5" => view_history(service, input),
            "6" => view_trades(service, input),
            "7" => update_nav(service, input).await,
            "8" => return Ok(()),
            _ => {
                println!("Please enter a valid selection (1 - 8)");
                continue;
            }
        };

        match result {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            }
            Err(e) => return Err(e.into()),
        }

        prompt::pause(input)?;
    }
}

fn view_funds(service: &FundService) -> Result<()> {
    ui::print_banner("PSEUDO FUNDS");
    let funds = service.list_funds()?;
    if funds.is_empty() {
        println!("NO PSEUDO FUNDS EXIST YET");
    } else {
        println!("{}", views::funds_table(&funds));
    }
    Ok(())
}

fn create_fund(service: &FundService, input: &mut impl BufRead) -> Result<()> {
    ui::print_banner("CREATE PSEUDO FUND");
    let name = prompt::read_line(input, "ENTER FUND NAME: ")?;
    let ticker = prompt::read_line(input, "ENTER FUND TICKER: ")?;
    let description = prompt::read_line(input, "ENTER FUND DESC: ")?;
    let shares_outstanding = prompt::read_positive_i32(input, "ENTER INITIAL SHARES OUTSTANDING: ")?;

    let fund = service.create_fund(NewFund::new(name, ticker, description, shares_outstanding))?;
    println!(
        "{}",
        ui::style_text(
            &format!("FUND {} CREATED SUCCESSFULLY", fund.ticker),
            ui::StyleType::Success
        )
    );
    Ok(())
}

async fn update_securities(service: &FundService, input: &mut impl BufRead) -> Result<()> {
    ui::print_banner("UPDATE FUND UNDERLYING SECURITIES");
    let fund_ticker = prompt::read_line(input, "ENTER FUND TICKER: ")?;
    let fund = service.get_fund(&fund_ticker)?;

    let symbol = prompt::read_line(input, "ENTER EQUITY TICKER: ")?;
    let quantity = prompt::read_positive_i32(input, "ENTER QUANTITY: ")?;
    let side = read_order_side(input)?;

    let ticket = service.prepare_order(&symbol, quantity, side).await?;
    println!(
        "ORDER SUMMARY: {} {} SHARES OF {} @ {} = ${:.2}",
        ticket.side, ticket.quantity, ticket.symbol, ticket.price, ticket.total
    );

    if !prompt::confirm(input, "EXECUTE (y/n)?: ")? {
        println!("ORDER CANCELLED");
        return Ok(());
    }

    let outcome = service.execute_order(&fund, &ticket)?;
    if let Some(gain_or_loss) = outcome.gain_or_loss {
        println!("REALIZED GAIN/LOSS: ${gain_or_loss:.2}");
    }
    println!(
        "{}",
        ui::style_text(
            &format!("SUCCESSFULLY UPDATED SECURITIES FOR FUND {}", fund.ticker),
            ui::StyleType::Success
        )
    );
    Ok(())
}

fn read_order_side(input: &mut impl BufRead) -> Result<OrderSide> {
    loop {
        let line = prompt::read_line(input, "ENTER ORDER TYPE (BUY/SELL): ")?;
        match line.parse::<OrderSide>() {
            Ok(side) => return Ok(side),
            Err(_) => println!(
                "{}",
                ui::style_text("Please enter BUY or SELL", ui::StyleType::Error)
            ),
        }
    }
}

fn view_securities(service: &FundService, input: &mut impl BufRead) -> Result<()> {
    ui::print_banner("VIEW FUND UNDERLYING SECURITIES");
    let ticker = prompt::read_line(input, "ENTER FUND TICKER: ")?;
    let holdings = service.list_holdings(&ticker)?;
    if holdings.is_empty() {
        println!("FUND {ticker} HAS NO UNDERLYING SECURITIES");
    } else {
        println!("{}", views::holdings_table(&holdings));
    }
    Ok(())
}

fn view_history(service: &FundService, input: &mut impl BufRead) -> Result<()> {
    ui::print_banner("VIEW FUND HISTORY");
    let ticker = prompt::read_line(input, "ENTER FUND TICKER: ")?;
    let history = service.list_history(&ticker)?;
    if history.is_empty() {
        println!("FUND {ticker} HAS NO NAV HISTORY");
    } else {
        println!("{}", views::history_table(&history));
    }
    Ok(())
}

fn view_trades(service: &FundService, input: &mut impl BufRead) -> Result<()> {
    ui::print_banner("VIEW FUND TRADES");
    let ticker = prompt::read_line(input, "ENTER FUND TICKER: ")?;
    let trades = service.list_trades(&ticker)?;
    println!("{}", views::orders_table(&trades));
    Ok(())
}

async fn update_nav(service: &FundService, input: &mut impl BufRead) -> Result<()> {
    ui::print_banner("MANUALLY UPDATE FUND NAV");
    let ticker = prompt::read_line(input, "ENTER FUND TICKER: ")?;

    let holdings = service.list_holdings(&ticker)?;
    let distinct_tickers: HashSet<&str> = holdings.iter().map(|h| h.ticker.as_str()).collect();

    let pb = ui::new_progress_bar(distinct_tickers.len() as u64, true);
    pb.set_message("Fetching quotes...");
    let result = service.update_nav(&ticker, &|| pb.inc(1)).await;
    pb.finish_and_clear();

    let entry = result?;
    println!(
        "{}",
        ui::style_text("NAV SUCCESSFULLY UPDATED", ui::StyleType::Success)
    );
    println!("NAV: ${:.4}  DATE: {}", entry.nav, entry.closing_date);
    Ok(())
}
