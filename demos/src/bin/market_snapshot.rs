//! Demo 1: Spot Market Snapshot
//!
//! Showcases: public endpoints, typed order books, decimal precision
//!
//! Run: cargo run --bin market_snapshot

use binance_rest::{BinanceRestClient, LimitOptions};
use colored::*;
use rust_decimal_macros::dec;

const SYMBOLS: [&str; 3] = ["BTCUSDT", "ETHUSDT", "BNBUSDT"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  SPOT MARKET SNAPSHOT".cyan().bold());
    println!("{}", "  Binance REST Demo - Order Book Top of Book".cyan());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = BinanceRestClient::new()?;
    let server_time = client.market().time().await?;
    println!("{} Server time {}\n", "✓".green(), server_time.server_time);

    println!(
        "  {:<10} {:>14} {:>14} {:>12} {:>12}",
        "SYMBOL".white().bold(),
        "BID".white().bold(),
        "ASK".white().bold(),
        "SPREAD BPS".white().bold(),
        "AVG 5M".white().bold()
    );
    println!("  {}", "─".repeat(66));

    let depth = LimitOptions::builder().limit(5u32).build();
    for symbol in SYMBOLS {
        let book = match client.market().depth(symbol, &depth).await {
            Ok(book) => book,
            Err(e) => {
                println!("  {:<10} {}", symbol.cyan(), e.to_string().red());
                continue;
            }
        };
        let avg = client.market().avg_price(symbol).await?;

        let (bid, ask) = match (book.best_bid(), book.best_ask()) {
            (Some(bid), Some(ask)) => (bid, ask),
            _ => {
                println!("  {:<10} {}", symbol.cyan(), "empty book".yellow());
                continue;
            }
        };
        let mid = (bid + ask) / dec!(2);
        let spread_bps = if mid.is_zero() {
            dec!(0)
        } else {
            ((ask - bid) / mid * dec!(10000)).round_dp(2)
        };

        let spread = if spread_bps > dec!(5) {
            spread_bps.to_string().yellow()
        } else {
            spread_bps.to_string().green()
        };

        println!(
            "  {:<10} {:>14} {:>14} {:>12} {:>12}",
            symbol.cyan(),
            bid.to_string(),
            ask.to_string(),
            spread,
            avg.price.round_dp(2).to_string()
        );
    }

    println!();
    Ok(())
}
