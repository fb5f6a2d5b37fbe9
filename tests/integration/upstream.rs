//! Provider clients against mocked upstream APIs

use btc_tracker::services::{
    DailyPriceSource, FearGreedClient, FetchError, KrakenClient, LiveCoinWatchClient,
    SentimentSource, SpotPriceSource,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::date;

#[tokio::test]
async fn kraken_client_parses_daily_closes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/0/public/OHLC"))
        .and(query_param("pair", "XBTUSD"))
        .and(query_param("interval", "1440"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": [],
            "result": {
                "XXBTZUSD": [
                    [1704067200, "42000.0", "43000.0", "41000.0", "42500.5", "42300.0", "10.0", 100],
                    [1704153600, "42500.5", "45000.0", "42000.0", "44900.0", "44000.0", "12.0", 120]
                ],
                "last": 1704153600
            }
        })))
        .mount(&server)
        .await;

    let client = KrakenClient::new(&server.uri()).unwrap();
    let prices = client.daily_prices().await.unwrap();

    assert_eq!(prices.len(), 2);
    assert_eq!(prices[0].date, date(2024, 1, 1));
    assert_eq!(prices[0].price, 42_500.5);
    assert_eq!(prices[1].date, date(2024, 1, 2));
}

#[tokio::test]
async fn kraken_error_array_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/0/public/OHLC"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": ["EGeneral:Invalid arguments"] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = KrakenClient::new(&server.uri()).unwrap();
    let err = client.daily_prices().await.unwrap_err();

    assert!(matches!(err, FetchError::Upstream { .. }));
}

#[tokio::test]
async fn server_errors_are_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fng/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(4)
        .mount(&server)
        .await;

    let client = FearGreedClient::new(&server.uri()).unwrap();
    let err = client.fear_greed().await.unwrap_err();

    match err {
        FetchError::Status { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fear_greed_client_parses_latest_reading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fng/"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Fear and Greed Index",
            "data": [{
                "value": "17",
                "value_classification": "Extreme Fear",
                "timestamp": "1704067200"
            }]
        })))
        .mount(&server)
        .await;

    let client = FearGreedClient::new(&server.uri()).unwrap();
    let index = client.fear_greed().await.unwrap();

    assert_eq!(index.value, 17);
    assert_eq!(index.classification, "Extreme Fear");
    assert_eq!(index.timestamp, 1_704_067_200);
}

#[tokio::test]
async fn fear_greed_out_of_range_value_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fng/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "value": "140", "value_classification": "?", "timestamp": "0" }]
        })))
        .mount(&server)
        .await;

    let client = FearGreedClient::new(&server.uri()).unwrap();
    let err = client.fear_greed().await.unwrap_err();

    assert!(matches!(err, FetchError::Parse { .. }));
}

#[tokio::test]
async fn live_coin_watch_sends_key_and_reads_rate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/coins/single"))
        .and(header("x-api-key", "test-key"))
        .and(body_partial_json(json!({ "currency": "USD", "code": "BTC" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rate": 67_123.45 })))
        .mount(&server)
        .await;

    let client = LiveCoinWatchClient::new(&server.uri(), Some("test-key".to_string())).unwrap();

    assert_eq!(client.current_price().await.unwrap(), 67_123.45);
}

#[tokio::test]
async fn live_coin_watch_without_key_is_a_config_error() {
    let client = LiveCoinWatchClient::new("http://127.0.0.1:9", None).unwrap();
    let err = client.current_price().await.unwrap_err();
    assert!(matches!(err, FetchError::Config { .. }));
    assert!(!err.is_transient());
}
