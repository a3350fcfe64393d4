//! CSV 종가 제공자와 포트폴리오 파일 통합 테스트

use std::fs;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use elliott_core::{
    AnalysisReport, Interval, PortfolioEntry, PortfolioResult, PriceRequest, PriceSource,
    WaveLabel, WaveTag, WaveTrend,
};
use elliott_data::{load_portfolio, write_results, CsvPriceSource, DataError};

#[tokio::test]
async fn test_csv_source_reads_ticker_file_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("MSFT.csv"),
        "date,close\n2024-01-02,370.87\n2024-01-03,370.60\n2024-01-04,,\n2024-01-05,367.75\n",
    )
    .unwrap();

    let source = CsvPriceSource::new(dir.path());
    let series = source
        .fetch_closes(&PriceRequest::new("MSFT", "2y", Interval::D1))
        .await
        .unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.last_price(), Some(dec!(367.75)));
}

#[tokio::test]
async fn test_csv_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = CsvPriceSource::new(dir.path()).load("NONE").await.unwrap_err();
    assert!(matches!(err, DataError::NotFound(_)));
}

#[tokio::test]
async fn test_csv_source_single_file_ignores_ticker() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("prices.csv");
    fs::write(&file, "timestamp,adj_close\n1704153600,10\n1704240000,11\n").unwrap();

    let series = CsvPriceSource::new(&file).load("ANY").await.unwrap();
    assert_eq!(series.len(), 2);
}

#[test]
fn test_load_portfolio_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("portfolio.csv");
    fs::write(
        &file,
        "ticker,period,interval,zigzag\nGOOGL,2y,1d,5.0\nPALO-ALTO-NETWORKS,1y,1d,4\n",
    )
    .unwrap();

    let entries = load_portfolio(&file).unwrap();
    let tickers: Vec<&str> = entries.iter().map(|e| e.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["GOOGL", "PANW"]);
}

#[test]
fn test_load_portfolio_missing_file() {
    let err = load_portfolio("no/such/portfolio.csv").unwrap_err();
    assert!(matches!(err, DataError::NotFound(_)));
}

#[test]
fn test_write_results_file() {
    let entry = PortfolioEntry {
        ticker: "UNH".to_string(),
        period: "2y".to_string(),
        interval: Interval::D1,
        zigzag_pct: dec!(5),
    };
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let labels: Vec<WaveLabel> = WaveTag::SEQUENCE
        .iter()
        .enumerate()
        .map(|(i, tag)| WaveLabel {
            timestamp: start + chrono::Duration::days(i as i64),
            price: dec!(500) + rust_decimal::Decimal::from(i),
            tag: *tag,
        })
        .collect();
    let report = AnalysisReport {
        zigzag_pct: dec!(5),
        last_price: Some(dec!(512.3456)),
        num_swings: 14,
        elliott_5_3_match: true,
        trend: Some(WaveTrend::Up),
        reason: None,
        labels,
        swings: Vec::new(),
    };
    let results = vec![
        PortfolioResult::success(&entry, report),
        PortfolioResult::failure(&entry, "No data for UNH"),
    ];

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("results.csv");
    write_results(&file, &results).unwrap();

    let mut reader = csv::Reader::from_path(&file).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "ticker");
    assert_eq!(&headers[10], "wave_1_date");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);

    assert_eq!(&rows[0][0], "UNH");
    assert_eq!(&rows[0][1], "512.3456");
    assert_eq!(&rows[0][6], "true");
    assert_eq!(&rows[0][7], "up");
    assert_eq!(&rows[0][9], "Success");
    assert_eq!(&rows[0][10], "2024-05-01");
    assert_eq!(&rows[0][11], "500");
    assert_eq!(&rows[0][25], "507");

    assert_eq!(&rows[1][1], "0");
    assert_eq!(&rows[1][7], "Error");
    assert_eq!(&rows[1][9], "Error: No data for UNH");
    assert_eq!(&rows[1][10], "");
}
