//! Demo 3: Account Overview
//!
//! Showcases: signed endpoints, structured exchange errors, listen keys
//!
//! Run: BINANCE_API_KEY=... BINANCE_API_SECRET=... cargo run --bin account_overview

use binance_rest::{BinanceRestClient, Credentials, RestError};
use colored::*;

fn report(label: &str, err: &RestError) {
    match err.api_error() {
        Some(api) => println!(
            "{} {}: code {:?}, status {:?}, {}",
            "✗".red(),
            label,
            api.code,
            api.status,
            api.message
        ),
        None => println!("{} {}: {}", "✗".red(), label, err),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(65).cyan());
    println!("{}", "  ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "  Binance REST Demo - Signed Requests".cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let client = BinanceRestClient::with_credentials(Credentials::from_env()?)?;

    match client.wallet().account_status(&Default::default()).await {
        Ok(status) => println!("{} Account status: {}", "✓".green(), status["data"]),
        Err(e) => report("account status", &e),
    }

    match client.usdm_trade().balance(&Default::default()).await {
        Ok(balances) => {
            println!("{} USD-M balances:", "✓".green());
            for entry in balances.as_array().into_iter().flatten() {
                let balance = entry["balance"].as_str().unwrap_or("0");
                if balance.trim_start_matches(['0', '.']).is_empty() {
                    continue;
                }
                println!("    {:<8} {}", entry["asset"].as_str().unwrap_or("?"), balance);
            }
        }
        Err(e) => report("futures balance", &e),
    }

    let stream = client.user_stream();
    match stream.create_listen_key().await {
        Ok(key) => {
            println!("{} Listen key opened ({} chars)", "✓".green(), key.listen_key.len());
            stream.renew_listen_key(&key.listen_key).await?;
            println!("{} Listen key renewed", "✓".green());
            stream.close_listen_key(&key.listen_key).await?;
            println!("{} Listen key closed", "✓".green());
        }
        Err(e) => report("listen key", &e),
    }

    println!();
    Ok(())
}
