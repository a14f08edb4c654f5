//! One exact request per endpoint group: method, host path and query

mod common;

use binance_rest::endpoints::broker::SpotCommissionOptions;
use binance_rest::endpoints::coinm::trade::CoinMAllOrdersOptions;
use binance_rest::{LimitOptions, MarginTransferType, RestError};
use common::{public_client, signed_client, signed_query};
use mockito::{Matcher, Mock, ServerGuard};
use rust_decimal_macros::dec;

async fn signed_mock(server: &mut ServerGuard, method: &str, path: &str, unsigned: &str) -> Mock {
    server
        .mock(method, path)
        .match_query(Matcher::Exact(signed_query(unsigned)))
        .match_header("x-mbx-apikey", "K")
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await
}

#[tokio::test]
async fn test_wallet_account_snapshot() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "GET",
        "/sapi/v1/accountSnapshot",
        "type=SPOT&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    client
        .wallet()
        .account_snapshot("spot", &Default::default())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_margin_transfer() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "POST",
        "/sapi/v1/margin/transfer",
        "asset=BTC&amount=0.5&type=2&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    client
        .margin()
        .transfer("btc", dec!(0.5), MarginTransferType::MarginToSpot, &Default::default())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_savings_purchase_flexible_product() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "POST",
        "/sapi/v1/lending/daily/purchase",
        "productId=BUSD001&amount=100&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    client
        .savings()
        .purchase_flexible_product("BUSD001", dec!(100), &Default::default())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_staking_product_list() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "GET",
        "/sapi/v1/staking/productList",
        "product=STAKING&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    client
        .staking()
        .product_list("STAKING", &Default::default())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sub_account_assets_encodes_email() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "GET",
        "/sapi/v3/sub-account/assets",
        "email=alice%2Btest%40example.com&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    client
        .sub_account()
        .assets("alice+test@example.com", &Default::default())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_convert_accept_quote() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "POST",
        "/sapi/v1/convert/acceptQuote",
        "quoteId=12415572564&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    client
        .convert()
        .accept_quote("12415572564", &Default::default())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_history_loan_income() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "GET",
        "/sapi/v1/loan/income",
        "asset=BNB&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    client
        .history()
        .loan_history("BNB", &Default::default())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bswap_swap() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "POST",
        "/sapi/v1/bswap/swap",
        "quoteAsset=USDT&baseAsset=BUSD&quoteQty=300000&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    client
        .bswap()
        .swap("USDT", "BUSD", dec!(300000), &Default::default())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_broker_change_commission() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "POST",
        "/sapi/v1/broker/subAccountApi/commission",
        "subAccountId=1&makerCommission=0.001&takerCommission=0.002&marginMakerCommission=0.003&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    let options = SpotCommissionOptions::builder()
        .margin_maker_commission(dec!(0.003))
        .build();
    client
        .broker()
        .change_commission("1", dec!(0.001), dec!(0.002), &options)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_broker_spot_transfer() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "POST",
        "/sapi/v1/broker/transfer",
        "asset=USDT&amount=25&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    client
        .broker()
        .spot_transfer("usdt", dec!(25), &Default::default())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_coinm_all_orders_uppercases_symbol() {
    let mut server = mockito::Server::new_async().await;
    let mock = signed_mock(
        &mut server,
        "GET",
        "/dapi/v1/allOrders",
        "symbol=BTCUSD_PERP&limit=10&timestamp=1700000000000",
    )
    .await;

    let client = signed_client(&server.url());
    let options = CoinMAllOrdersOptions::builder()
        .symbol("btcusd_perp")
        .limit(10u32)
        .build();
    client.coinm_trade().all_orders(&options).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_futures_market_depth() {
    let mut server = mockito::Server::new_async().await;
    let book = r#"{"lastUpdateId":1,"bids":[["1.0","2.0"]],"asks":[["1.5","3.0"]]}"#;
    let usdm = server
        .mock("GET", "/fapi/v1/depth")
        .match_query(Matcher::Exact("symbol=BTCUSDT&limit=5".into()))
        .with_status(200)
        .with_body(book)
        .create_async()
        .await;
    let coinm = server
        .mock("GET", "/dapi/v1/depth")
        .match_query(Matcher::Exact("symbol=BTCUSD_PERP&limit=5".into()))
        .with_status(200)
        .with_body(book)
        .create_async()
        .await;

    let client = public_client(&server.url());
    let options = LimitOptions::builder().limit(5u32).build();
    client.usdm_market().depth("btcusdt", &options).await.unwrap();
    client
        .coinm_market()
        .depth("btcusd_perp", &options)
        .await
        .unwrap();
    usdm.assert_async().await;
    coinm.assert_async().await;
}

#[tokio::test]
async fn test_futures_listen_keys_send_api_key_only() {
    let mut server = mockito::Server::new_async().await;
    let usdm = server
        .mock("POST", "/fapi/v1/listenKey")
        .match_header("x-mbx-apikey", "K")
        .with_status(200)
        .with_body(r#"{"listenKey":"usdm-key"}"#)
        .create_async()
        .await;
    let coinm = server
        .mock("PUT", "/dapi/v1/listenKey")
        .match_header("x-mbx-apikey", "K")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = signed_client(&server.url());
    let key = client.usdm_user_stream().start().await.unwrap();
    assert_eq!(key.listen_key, "usdm-key");
    client.coinm_user_stream().keepalive().await.unwrap();
    usdm.assert_async().await;
    coinm.assert_async().await;
}

#[tokio::test]
async fn test_futures_listen_keys_need_credentials() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = public_client(&server.url());
    let err = client.usdm_user_stream().start().await.unwrap_err();
    assert!(matches!(err, RestError::AuthRequired));
    let err = client.coinm_user_stream().start().await.unwrap_err();
    assert!(matches!(err, RestError::AuthRequired));
    mock.assert_async().await;
}
