//! 포트폴리오 일괄 분석 타입.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AnalysisReport, PriceRequest, WaveLabel, WaveTrend};
use crate::types::{Interval, Percentage, Price};

/// 티커 보정 목록 (포트폴리오 파일에 흔히 잘못 적히는 이름 → 실제 티커).
const TICKER_ALIASES: &[(&str, &str)] = &[("PALO-ALTO-NETWORKS", "PANW")];

/// 잘못 적힌 티커를 실제 티커로 보정합니다.
pub fn normalize_ticker(ticker: &str) -> String {
    let trimmed = ticker.trim();
    TICKER_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
        .map(|(_, actual)| (*actual).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// 포트폴리오 항목 (분석할 종목 한 건).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// 종목 티커
    pub ticker: String,
    /// 조회 기간
    pub period: String,
    /// 시세 간격
    pub interval: Interval,
    /// ZigZag 임계값 (%)
    pub zigzag_pct: Percentage,
}

impl PortfolioEntry {
    /// 시세 요청으로 변환합니다.
    pub fn request(&self) -> PriceRequest {
        PriceRequest::new(self.ticker.clone(), self.period.clone(), self.interval)
    }
}

/// 종목 분석 상태.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    /// 분석 성공
    Success,
    /// 분석 실패 (에러 메시지)
    Error(String),
}

impl AnalysisStatus {
    /// 성공 여부.
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisStatus::Success)
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisStatus::Success => write!(f, "Success"),
            AnalysisStatus::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// 포트폴리오 종목 한 건의 분석 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioResult {
    /// 종목 티커
    pub ticker: String,
    /// 마지막 가격 (실패 시 0)
    pub last_price: Price,
    /// 조회 기간
    pub period: String,
    /// 시세 간격
    pub interval: Interval,
    /// ZigZag 임계값 (%)
    pub zigzag_pct: Percentage,
    /// 스윙 개수 (실패 시 0)
    pub num_swings: usize,
    /// 5-3 패턴 일치 여부
    pub elliott_5_3_match: bool,
    /// 추세 방향
    pub trend: Option<WaveTrend>,
    /// 파동 라벨
    pub labels: Vec<WaveLabel>,
    /// 분석 시각
    pub analysis_date: DateTime<Utc>,
    /// 분석 상태
    pub status: AnalysisStatus,
}

impl PortfolioResult {
    /// 분석 리포트에서 성공 결과를 생성합니다.
    pub fn success(entry: &PortfolioEntry, report: AnalysisReport) -> Self {
        Self {
            ticker: entry.ticker.clone(),
            last_price: report.last_price.unwrap_or(Decimal::ZERO),
            period: entry.period.clone(),
            interval: entry.interval,
            zigzag_pct: entry.zigzag_pct,
            num_swings: report.num_swings,
            elliott_5_3_match: report.elliott_5_3_match,
            trend: report.trend,
            labels: report.labels,
            analysis_date: Utc::now(),
            status: AnalysisStatus::Success,
        }
    }

    /// 실패 결과를 생성합니다.
    pub fn failure(entry: &PortfolioEntry, message: impl Into<String>) -> Self {
        Self {
            ticker: entry.ticker.clone(),
            last_price: Decimal::ZERO,
            period: entry.period.clone(),
            interval: entry.interval,
            zigzag_pct: entry.zigzag_pct,
            num_swings: 0,
            elliott_5_3_match: false,
            trend: None,
            labels: Vec::new(),
            analysis_date: Utc::now(),
            status: AnalysisStatus::Error(message.into()),
        }
    }

    /// 출력용 추세 문자열.
    ///
    /// 실패는 "Error", 추세가 없으면 "N/A".
    pub fn trend_label(&self) -> &'static str {
        if !self.status.is_success() {
            return "Error";
        }
        self.trend.map(|t| t.as_str()).unwrap_or("N/A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry() -> PortfolioEntry {
        PortfolioEntry {
            ticker: "AAPL".to_string(),
            period: "2y".to_string(),
            interval: Interval::D1,
            zigzag_pct: dec!(5),
        }
    }

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker("PALO-ALTO-NETWORKS"), "PANW");
        assert_eq!(normalize_ticker(" palo-alto-networks "), "PANW");
        assert_eq!(normalize_ticker(" AAPL "), "AAPL");
    }

    #[test]
    fn test_failure_result_shape() {
        let result = PortfolioResult::failure(&entry(), "No data for AAPL");
        assert_eq!(result.last_price, Decimal::ZERO);
        assert_eq!(result.num_swings, 0);
        assert!(!result.elliott_5_3_match);
        assert_eq!(result.trend_label(), "Error");
        assert_eq!(result.status.to_string(), "Error: No data for AAPL");
    }

    #[test]
    fn test_success_without_trend_is_na() {
        let report = AnalysisReport {
            zigzag_pct: dec!(5),
            last_price: Some(dec!(101.5)),
            num_swings: 3,
            elliott_5_3_match: false,
            trend: None,
            reason: None,
            labels: Vec::new(),
            swings: Vec::new(),
        };
        let result = PortfolioResult::success(&entry(), report);
        assert_eq!(result.last_price, dec!(101.5));
        assert_eq!(result.trend_label(), "N/A");
        assert!(result.status.is_success());
    }

    #[test]
    fn test_entry_request() {
        let request = entry().request();
        assert_eq!(request.ticker, "AAPL");
        assert_eq!(request.interval, Interval::D1);
    }
}
