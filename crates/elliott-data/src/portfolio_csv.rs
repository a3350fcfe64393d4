//! 포트폴리오 CSV 입출력.
//!
//! 입력: `ticker,period,interval,zigzag`
//!
//! 출력: `ticker,last_price,period,interval,zigzag_pct,num_swings,elliott_5_3_match,
//! trend,analysis_date,status` 뒤에 파동 라벨별 `wave_<라벨>_date`, `wave_<라벨>_price`

use std::io::Write;
use std::path::Path;

use chrono::Local;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use elliott_core::{normalize_ticker, Interval, PortfolioEntry, PortfolioResult, WaveTag};

use crate::error::{DataError, Result};

const BASE_COLUMNS: [&str; 10] = [
    "ticker",
    "last_price",
    "period",
    "interval",
    "zigzag_pct",
    "num_swings",
    "elliott_5_3_match",
    "trend",
    "analysis_date",
    "status",
];

#[derive(Debug, Deserialize)]
struct PortfolioRow {
    ticker: String,
    period: String,
    interval: String,
    zigzag: Decimal,
}

/// 포트폴리오 CSV 파일을 읽습니다.
pub fn load_portfolio(path: impl AsRef<Path>) -> Result<Vec<PortfolioEntry>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::NotFound(path.display().to_string()));
    }

    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let entries = read_portfolio(reader)?;

    info!(file = %path.display(), entries = entries.len(), "포트폴리오 로드 완료");
    Ok(entries)
}

/// 임의의 입력에서 포트폴리오를 읽습니다.
pub fn read_portfolio<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<PortfolioEntry>> {
    let mut entries = Vec::new();
    for (row, record) in reader.deserialize::<PortfolioRow>().enumerate() {
        let record = record?;
        let interval: Interval = record.interval.parse().map_err(|e| {
            DataError::InvalidData(format!("row {}: {}", row + 2, e))
        })?;

        entries.push(PortfolioEntry {
            ticker: normalize_ticker(&record.ticker),
            period: record.period,
            interval,
            zigzag_pct: record.zigzag,
        });
    }
    Ok(entries)
}

/// 결과 CSV의 헤더.
pub fn result_headers() -> Vec<String> {
    let mut headers: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    for tag in WaveTag::SEQUENCE {
        headers.push(format!("wave_{}_date", tag));
        headers.push(format!("wave_{}_price", tag));
    }
    headers
}

fn result_record(result: &PortfolioResult) -> Vec<String> {
    let mut record = vec![
        result.ticker.clone(),
        result.last_price.round_dp(4).normalize().to_string(),
        result.period.clone(),
        result.interval.to_string(),
        result.zigzag_pct.normalize().to_string(),
        result.num_swings.to_string(),
        result.elliott_5_3_match.to_string(),
        result.trend_label().to_string(),
        result
            .analysis_date
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        result.status.to_string(),
    ];

    let date_format = if result.interval.is_intraday() {
        "%Y-%m-%d %H:%M"
    } else {
        "%Y-%m-%d"
    };
    for tag in WaveTag::SEQUENCE {
        match result.labels.iter().find(|l| l.tag == tag) {
            Some(label) => {
                record.push(label.timestamp.format(date_format).to_string());
                record.push(label.price.round_dp(4).normalize().to_string());
            }
            None => {
                record.push(String::new());
                record.push(String::new());
            }
        }
    }
    record
}

/// 결과를 CSV로 씁니다.
pub fn write_results_to<W: Write>(writer: W, results: &[PortfolioResult]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(result_headers())?;
    for result in results {
        writer.write_record(result_record(result))?;
    }
    writer.flush()?;
    Ok(())
}

/// 결과를 CSV 파일로 저장합니다.
pub fn write_results(path: impl AsRef<Path>, results: &[PortfolioResult]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_results_to(file, results)?;
    info!(file = %path.display(), rows = results.len(), "분석 결과 저장 완료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_read_portfolio_applies_alias() {
        let data = "ticker,period,interval,zigzag\n\
                    AAPL,2y,1d,5\n\
                    PALO-ALTO-NETWORKS,1y,1wk,7.5\n";
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());
        let entries = read_portfolio(reader).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].ticker, "AAPL");
        assert_eq!(entries[0].interval, Interval::D1);
        assert_eq!(entries[0].zigzag_pct, dec!(5));
        assert_eq!(entries[1].ticker, "PANW");
        assert_eq!(entries[1].interval, Interval::W1);
        assert_eq!(entries[1].zigzag_pct, dec!(7.5));
    }

    #[test]
    fn test_read_portfolio_rejects_bad_interval() {
        let data = "ticker,period,interval,zigzag\nAAPL,2y,fortnight,5\n";
        let reader = csv::Reader::from_reader(data.as_bytes());
        let err = read_portfolio(reader).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_read_portfolio_rejects_bad_zigzag() {
        let data = "ticker,period,interval,zigzag\nAAPL,2y,1d,five\n";
        let reader = csv::Reader::from_reader(data.as_bytes());
        assert!(matches!(read_portfolio(reader), Err(DataError::Csv(_))));
    }

    #[test]
    fn test_intraday_wave_dates_keep_time() {
        use chrono::{TimeZone, Utc};
        use elliott_core::{AnalysisReport, WaveLabel};

        let entry = PortfolioEntry {
            ticker: "SPY".to_string(),
            period: "5d".to_string(),
            interval: Interval::M15,
            zigzag_pct: dec!(0.5),
        };
        let report = AnalysisReport {
            zigzag_pct: dec!(0.5),
            last_price: Some(dec!(512)),
            num_swings: 10,
            elliott_5_3_match: false,
            trend: None,
            reason: None,
            labels: vec![WaveLabel {
                timestamp: Utc.with_ymd_and_hms(2024, 6, 3, 14, 30, 0).unwrap(),
                price: dec!(510.25),
                tag: WaveTag::One,
            }],
            swings: Vec::new(),
        };

        let mut out = Vec::new();
        write_results_to(&mut out, &[PortfolioResult::success(&entry, report)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains(",2024-06-03 14:30,510.25,"));
    }

    #[test]
    fn test_result_headers() {
        let headers = result_headers();
        assert_eq!(headers.len(), 26);
        assert_eq!(headers[0], "ticker");
        assert_eq!(headers[9], "status");
        assert_eq!(headers[10], "wave_1_date");
        assert_eq!(headers[25], "wave_C_price");
    }
}
