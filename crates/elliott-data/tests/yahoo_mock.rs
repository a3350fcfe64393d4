//! Yahoo Finance 제공자 통합 테스트 (mockito 서버)

use mockito::Matcher;
use rust_decimal_macros::dec;

use elliott_core::{ElliottError, FetchConfig, Interval, PriceRequest, PriceSource};
use elliott_data::{DataError, YahooPriceSource};

const CHART_BODY: &str = r#"{
    "chart": {
        "result": [{
            "timestamp": [1704205800, 1704292200, 1704378600],
            "indicators": {
                "quote": [{"close": [100.0, 110.0, null]}],
                "adjclose": [{"adjclose": [99.5, 109.5, null]}]
            }
        }],
        "error": null
    }
}"#;

fn source_for(server: &mockito::ServerGuard) -> YahooPriceSource {
    let config = FetchConfig {
        base_url: server.url(),
        timeout_secs: 5,
        ..FetchConfig::default()
    };
    YahooPriceSource::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_closes_sends_range_and_interval() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("range".into(), "6mo".into()),
            Matcher::UrlEncoded("interval".into(), "1wk".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CHART_BODY)
        .create_async()
        .await;

    let source = source_for(&server);
    let series = source
        .fetch_closes(&PriceRequest::new("AAPL", "6mo", Interval::W1))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(series.len(), 2);
    assert_eq!(series.last_price(), Some(dec!(109.5)));
}

#[tokio::test]
async fn test_http_404_is_no_data() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v8/finance/chart/NOPE")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#)
        .create_async()
        .await;

    let source = source_for(&server);
    let err = source
        .fetch(&PriceRequest::new("NOPE", "2y", Interval::D1))
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::NoData(ref t) if t == "NOPE"));

    // PriceSource 경계에서는 코어 에러로 변환
    let err = source
        .fetch_closes(&PriceRequest::new("NOPE", "2y", Interval::D1))
        .await
        .unwrap_err();
    assert!(matches!(err, ElliottError::Data(ref msg) if msg == "No data for NOPE"));
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream failure")
        .create_async()
        .await;

    let err = source_for(&server)
        .fetch(&PriceRequest::new("AAPL", "2y", Interval::D1))
        .await
        .unwrap_err();
    match err {
        DataError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream failure");
        }
        other => panic!("unexpected error: {other}"),
    }
}
