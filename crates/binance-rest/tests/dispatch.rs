//! Request dispatch against a mock server: URL layout, headers and errors

mod common;

use binance_rest::{BinanceRestClient, ClientConfig, Credentials, Params, ProductFamily, RestError};
use common::{public_client, signed_client, signed_query, test_config};
use mockito::Matcher;
use reqwest::Method;
use serde_json::{json, Value};

#[tokio::test]
async fn test_signed_request_query_is_exact() {
    let mut server = mockito::Server::new_async().await;
    let expected = signed_query("symbol=BTCUSDT&recvWindow=5000&timestamp=1700000000000");
    let mock = server
        .mock("GET", "/x")
        .match_query(Matcher::Exact(expected))
        .match_header("x-mbx-apikey", "K")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let client = signed_client(&server.url());
    let params = Params::new().with("symbol", "BTCUSDT").with("recvWindow", 5000);
    let body: Value = client
        .dispatcher(ProductFamily::Spot)
        .signed(Method::GET, "/x", params)
        .await
        .unwrap();

    assert_eq!(body, json!({"ok": true}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_public_request_without_params_has_no_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/ping")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = public_client(&server.url());
    client.market().ping().await.unwrap();

    let prepared = client
        .dispatcher(ProductFamily::Spot)
        .prepare_public(Method::GET, "/api/v3/ping", &Params::new());
    assert!(!prepared.url.contains('?'));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_exchange_error_is_structured() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/depth")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":-1121,"msg":"Invalid symbol."}"#)
        .create_async()
        .await;

    let client = public_client(&server.url());
    let err = client
        .market()
        .depth("NOPE", &Default::default())
        .await
        .unwrap_err();

    let api = err.api_error().expect("api error");
    assert_eq!(api.status, Some(400));
    assert_eq!(api.code, Some(-1121));
    assert_eq!(api.message, "Invalid symbol.");
    assert_eq!(api.body, Some(json!({"code": -1121, "msg": "Invalid symbol."})));
    assert!(!api.is_network());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_without_msg_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v3/time")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let client = public_client(&server.url());
    let err = client.market().time().await.unwrap_err();

    let api = err.api_error().expect("api error");
    assert_eq!(api.status, Some(502));
    assert_eq!(api.code, None);
    assert_eq!(api.message, "network error");
    assert_eq!(api.body, Some(Value::String("Bad Gateway".into())));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_rate_limit_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v3/time")
        .with_status(429)
        .with_body(r#"{"code":-1003,"msg":"Too many requests."}"#)
        .create_async()
        .await;

    let client = public_client(&server.url());
    let err = client.market().time().await.unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let client = public_client("http://127.0.0.1:1");
    let err = client.market().ping().await.unwrap_err();

    let api = err.api_error().expect("api error");
    assert_eq!(api.status, None);
    assert_eq!(api.code, None);
    assert!(api.message.starts_with("network error"));
    assert!(api.is_network());
}

#[tokio::test]
async fn test_missing_credentials_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = public_client(&server.url());
    let err = client
        .wallet()
        .account_status(&Default::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::AuthRequired));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_configured_recv_window_is_signed() {
    let mut server = mockito::Server::new_async().await;
    let expected = signed_query("recvWindow=7000&timestamp=1700000000000");
    let mock = server
        .mock("GET", "/sapi/v1/account/status")
        .match_query(Matcher::Exact(expected))
        .with_status(200)
        .with_body(r#"{"data":"Normal"}"#)
        .create_async()
        .await;

    let config = test_config(&server.url())
        .with_credentials(Credentials::new("K", "S"))
        .with_recv_window(7000);
    let client = BinanceRestClient::with_config(config).unwrap();
    client
        .wallet()
        .account_status(&Default::default())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_per_call_credentials_override() {
    let mut server = mockito::Server::new_async().await;
    let unsigned = "timestamp=1700000000000";
    let expected = format!(
        "{unsigned}&signature={}",
        binance_auth::hmac_sha256_hex(b"S2", unsigned)
    );
    let mock = server
        .mock("GET", "/x")
        .match_query(Matcher::Exact(expected))
        .match_header("x-mbx-apikey", "K2")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = signed_client(&server.url());
    let other = Credentials::new("K2", "S2");
    let _: Value = client
        .dispatcher(ProductFamily::Spot)
        .with_credentials(&other)
        .signed(Method::GET, "/x", Params::new())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_user_agent_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/ping")
        .match_header("user-agent", "my-bot/1.0")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let config: ClientConfig = test_config(&server.url()).with_user_agent("my-bot/1.0");
    let client = BinanceRestClient::with_config(config).unwrap();
    client.market().ping().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unparseable_success_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v3/time")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = public_client(&server.url());
    let err = client.market().time().await.unwrap_err();
    assert!(matches!(err, RestError::Parse(_)));
}
