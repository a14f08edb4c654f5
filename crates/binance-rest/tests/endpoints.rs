//! Endpoint wrappers against a mock server

mod common;

use binance_rest::endpoints::futures::{BatchOrder, NewFuturesOrderOptions};
use binance_rest::{
    BaseUrls, BinanceRestClient, Credentials, LimitOptions, OrderSide, OrderType, RestError,
    TimeInForce,
};
use common::{public_client, signed_client, signed_query, test_config};
use mockito::Matcher;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_missing_required_argument_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = signed_client(&server.url());

    let err = client.market().depth("", &LimitOptions::default()).await.unwrap_err();
    assert!(matches!(err, RestError::MissingParameter("symbol")));

    let err = client
        .sub_account()
        .assets("  ", &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::MissingParameter("email")));

    let err = client
        .broker()
        .bnb_burn_status("", &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::MissingParameter("subAccountId")));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_depth_uppercases_symbol_and_parses_book() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/depth")
        .match_query(Matcher::Exact("symbol=BTCUSDT&limit=5".into()))
        .with_status(200)
        .with_body(
            r#"{"lastUpdateId":1027024,"bids":[["4.00000000","431.00000000"]],"asks":[["4.00000200","12.00000000"]]}"#,
        )
        .create_async()
        .await;

    let client = public_client(&server.url());
    let options = LimitOptions::builder().limit(5u32).build();
    let book = client.market().depth("btcusdt", &options).await.unwrap();

    assert_eq!(book.last_update_id, 1027024);
    assert_eq!(book.best_bid(), Some(dec!(4.00000000)));
    assert_eq!(book.spread(), Some(dec!(0.00000200)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_avg_price_is_typed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v3/avgPrice")
        .match_query(Matcher::Exact("symbol=ETHBTC".into()))
        .with_status(200)
        .with_body(r#"{"mins":5,"price":"0.05123"}"#)
        .create_async()
        .await;

    let client = public_client(&server.url());
    let avg = client.market().avg_price("ethbtc").await.unwrap();
    assert_eq!(avg.mins, 5);
    assert_eq!(avg.price, dec!(0.05123));
}

#[tokio::test]
async fn test_listen_key_sends_key_without_signature() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v3/userDataStream")
        .match_header("x-mbx-apikey", "K")
        .with_status(200)
        .with_body(r#"{"listenKey":"pqia91ma19a5s61cv6a81va65sdf19v8a65a1a5s61cv6a81va65sdf19v8a65a1"}"#)
        .create_async()
        .await;

    let client = signed_client(&server.url());
    let key = client.user_stream().create_listen_key().await.unwrap();
    assert!(key.listen_key.starts_with("pqia91ma"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_signed_wrapper_with_decimal_amount() {
    let mut server = mockito::Server::new_async().await;
    let expected = signed_query("tokenName=BTCUP&cost=10.5&timestamp=1700000000000");
    let mock = server
        .mock("POST", "/sapi/v1/blvt/subscribe")
        .match_query(Matcher::Exact(expected))
        .with_status(200)
        .with_body(r#"{"id":123,"status":"S","tokenName":"BTCUP"}"#)
        .create_async()
        .await;

    let client = signed_client(&server.url());
    let response = client
        .blvt()
        .subscribe("BTCUP", dec!(10.5), &Default::default())
        .await
        .unwrap();
    assert_eq!(response["id"], 123);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_futures_order_parameter_order() {
    let mut server = mockito::Server::new_async().await;
    let expected = signed_query(
        "symbol=BTCUSDT&side=BUY&type=LIMIT&timeInForce=GTC&quantity=0.01&price=30000&timestamp=1700000000000",
    );
    let mock = server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Exact(expected))
        .with_status(200)
        .with_body(r#"{"orderId":22542179,"status":"NEW"}"#)
        .create_async()
        .await;

    let client = signed_client(&server.url());
    let options = NewFuturesOrderOptions::builder()
        .time_in_force(TimeInForce::Gtc)
        .quantity(dec!(0.01))
        .price(dec!(30000))
        .build();
    let response = client
        .usdm_trade()
        .new_order("btcusdt", OrderSide::Buy, OrderType::Limit, &options)
        .await
        .unwrap();
    assert_eq!(response["orderId"], 22542179);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_batch_orders_sent_as_json_array() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/fapi/v1/batchOrders")
        .match_query(Matcher::Regex(
            r"^batchOrders=%5B%7B%22symbol%22%3A%22BTCUSDT%22%2C%22side%22%3A%22SELL%22.*%5D&timestamp=1700000000000&signature=[0-9a-f]{64}$"
                .into(),
        ))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = signed_client(&server.url());
    let orders = [
        BatchOrder::market("btcusdt", OrderSide::Sell, dec!(0.5)),
        BatchOrder::limit("ETHUSDT", OrderSide::Buy, dec!(1), dec!(2000)),
    ];
    client
        .usdm_trade()
        .batch_orders(&orders, &Default::default())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_product_families_use_their_hosts() {
    let mut spot = mockito::Server::new_async().await;
    let mut usdm = mockito::Server::new_async().await;
    let mut coinm = mockito::Server::new_async().await;

    let spot_mock = spot
        .mock("GET", "/api/v3/time")
        .with_status(200)
        .with_body(r#"{"serverTime":1}"#)
        .create_async()
        .await;
    let usdm_mock = usdm
        .mock("GET", "/fapi/v1/time")
        .with_status(200)
        .with_body(r#"{"serverTime":2}"#)
        .create_async()
        .await;
    let coinm_mock = coinm
        .mock("GET", "/dapi/v1/time")
        .with_status(200)
        .with_body(r#"{"serverTime":3}"#)
        .create_async()
        .await;

    let urls = BaseUrls {
        spot: spot.url(),
        usd_m_futures: usdm.url(),
        coin_m_futures: coinm.url(),
    };
    let client =
        BinanceRestClient::with_config(test_config(&spot.url()).with_base_urls(urls)).unwrap();

    assert_eq!(client.market().time().await.unwrap().server_time, 1);
    assert_eq!(client.usdm_market().time().await.unwrap().server_time, 2);
    assert_eq!(client.coinm_market().time().await.unwrap().server_time, 3);

    spot_mock.assert_async().await;
    usdm_mock.assert_async().await;
    coinm_mock.assert_async().await;
}

#[tokio::test]
async fn test_client_side_argument_checks() {
    let client = signed_client("http://127.0.0.1:1");

    let err = client
        .convert()
        .trade_history(2_000, 1_000, &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));

    let err = client
        .usdm_trade()
        .change_leverage("BTCUSDT", 0, &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));

    let err = client
        .coinm_trade()
        .user_trades(&Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));

    let too_many = vec![BatchOrder::market("BTCUSDT", OrderSide::Buy, dec!(1)); 6];
    let err = client
        .usdm_trade()
        .batch_orders(&too_many, &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_isolated_margin_symbol_is_sent_as_given() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/sapi/v1/userDataStream/isolated")
        .match_query(Matcher::Exact("symbol=btcusdt".into()))
        .with_status(200)
        .with_body(r#"{"listenKey":"abc"}"#)
        .create_async()
        .await;

    let client = BinanceRestClient::with_config(
        test_config(&server.url()).with_credentials(Credentials::api_key_only("K")),
    )
    .unwrap();
    let key = client
        .user_stream()
        .create_isolated_margin_listen_key("btcusdt")
        .await
        .unwrap();
    assert_eq!(key.listen_key, "abc");
    mock.assert_async().await;
}
