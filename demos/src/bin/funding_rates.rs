//! Demo 2: Futures Funding Rate Monitor
//!
//! Showcases: USD-M futures market data, funding rate history
//!
//! Run: cargo run --bin funding_rates

use binance_rest::endpoints::futures::{FundingRateHistoryOptions, SymbolOptions};
use binance_rest::BinanceRestClient;
use colored::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::str::FromStr;

const SYMBOLS: [&str; 3] = ["BTCUSDT", "ETHUSDT", "SOLUSDT"];

fn decimal(value: &Value, key: &str) -> Decimal {
    value
        .get(key)
        .and_then(Value::as_str)
        .and_then(|s| Decimal::from_str(s).ok())
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  FUTURES FUNDING RATE MONITOR".cyan().bold());
    println!("{}", "  Binance REST Demo - USD-M Perpetual Analytics".cyan());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = BinanceRestClient::new()?;
    let market = client.usdm_market();

    println!(
        "  {:<10} {:>12} {:>14} {:>12} {:>14}",
        "SYMBOL".white().bold(),
        "MARK PRICE".white().bold(),
        "FUNDING RATE".white().bold(),
        "ANNUAL".white().bold(),
        "AVG LAST 10".white().bold()
    );
    println!("  {}", "─".repeat(66));

    for symbol in SYMBOLS {
        let premium = market
            .mark_price(&SymbolOptions::builder().symbol(symbol).build())
            .await?;
        let mark_price = decimal(&premium, "markPrice");
        let funding_rate = decimal(&premium, "lastFundingRate");
        // Three funding intervals per day
        let annual = funding_rate * dec!(3) * dec!(365) * dec!(100);

        let history = market
            .funding_rate_history(
                &FundingRateHistoryOptions::builder()
                    .symbol(symbol)
                    .limit(10u32)
                    .build(),
            )
            .await?;
        let rates: Vec<Decimal> = history
            .as_array()
            .map(|entries| entries.iter().map(|e| decimal(e, "fundingRate")).collect())
            .unwrap_or_default();
        let average = if rates.is_empty() {
            Decimal::ZERO
        } else {
            rates.iter().sum::<Decimal>() / Decimal::from(rates.len())
        };

        let rate = format!("{:.4}%", funding_rate * dec!(100));
        let rate = if funding_rate.is_sign_negative() {
            rate.red()
        } else {
            rate.green()
        };

        println!(
            "  {:<10} {:>12} {:>14} {:>11}% {:>13}%",
            symbol.cyan(),
            mark_price.round_dp(2).to_string(),
            rate,
            annual.round_dp(2).to_string(),
            (average * dec!(100)).round_dp(4).to_string()
        );
    }

    println!();
    Ok(())
}
