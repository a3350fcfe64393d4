//! 로컬 CSV 시세 제공자.
//!
//! 디렉터리를 지정하면 `<dir>/<TICKER>.csv`를, 파일을 지정하면 그 파일을 읽습니다.
//! 헤더에서 시각 컬럼(`date`, `timestamp`, `datetime`, `time`)과
//! 종가 컬럼(`adj_close`, `adj close`, `adjclose`, `close` 순으로 우선)을 찾습니다.
//! 조회 기간과 간격은 무시하고 파일 전체를 사용합니다.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use elliott_core::{ElliottResult, PricePoint, PriceRequest, PriceSeries, PriceSource};

use crate::error::{DataError, Result};

const DATE_COLUMNS: &[&str] = &["date", "timestamp", "datetime", "time"];
const CLOSE_COLUMNS: &[&str] = &["adj_close", "adj close", "adjclose", "close"];

/// CSV 파일 종가 제공자.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    /// 디렉터리 또는 단일 파일 경로로 제공자를 생성합니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 종목에 해당하는 파일 경로.
    pub fn file_for(&self, ticker: &str) -> PathBuf {
        if self.path.is_dir() {
            self.path.join(format!("{}.csv", ticker))
        } else {
            self.path.clone()
        }
    }

    /// 종가 시계열을 읽습니다.
    pub async fn load(&self, ticker: &str) -> Result<PriceSeries> {
        let file = self.file_for(ticker);
        debug!(ticker, file = %file.display(), "CSV 종가 로드");

        let content = match tokio::fs::read_to_string(&file).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataError::NotFound(file.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        parse_closes(ticker, &file, &content)
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch_closes(&self, request: &PriceRequest) -> ElliottResult<PriceSeries> {
        Ok(self.load(&request.ticker).await?)
    }
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(candidate))
    })
}

/// CSV 본문에서 종가 시계열을 만듭니다.
fn parse_closes(ticker: &str, file: &Path, content: &str) -> Result<PriceSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let date_col = find_column(&headers, DATE_COLUMNS).ok_or_else(|| {
        DataError::InvalidData(format!("{}: no date/timestamp column", file.display()))
    })?;
    let close_col = find_column(&headers, CLOSE_COLUMNS).ok_or_else(|| {
        DataError::InvalidData(format!("{}: no close/adj_close column", file.display()))
    })?;

    let mut points = Vec::new();
    let mut skipped = 0usize;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let raw_close = record.get(close_col).unwrap_or_default();
        let close = match parse_price(raw_close) {
            Some(close) => close,
            None => {
                skipped += 1;
                continue;
            }
        };

        let raw_date = record.get(date_col).unwrap_or_default();
        let timestamp = parse_timestamp(raw_date).ok_or_else(|| {
            DataError::InvalidData(format!(
                "{} row {}: invalid date '{}'",
                file.display(),
                row + 2,
                raw_date
            ))
        })?;

        points.push(PricePoint::new(timestamp, close));
    }

    if skipped > 0 {
        warn!(ticker, skipped, "결측 종가 제외");
    }

    let series = PriceSeries::from_unsorted(points);
    if series.is_empty() {
        return Err(DataError::NoData(ticker.to_string()));
    }
    Ok(series)
}

/// 종가 문자열을 파싱합니다. 빈 값, `NaN`, 0 이하는 결측으로 취급합니다.
fn parse_price(raw: &str) -> Option<Decimal> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") || raw.eq_ignore_ascii_case("null") {
        return None;
    }
    raw.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
        .filter(|p| *p > Decimal::ZERO)
}

/// 시각 문자열을 파싱합니다.
///
/// 지원 형식: `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, RFC 3339, 유닉스 초.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
