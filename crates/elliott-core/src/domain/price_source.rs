//! 시세 제공자 trait 및 요청 타입.
//!
//! 분석 코어는 가격 수집 방법을 알지 못합니다. 일괄 분석기는 이 trait을 통해
//! 종목별 종가 시계열을 받아옵니다. 실제 구현(Yahoo Finance, CSV)은 `elliott-data`에 있습니다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::PriceSeries;
use crate::error::ElliottResult;
use crate::types::Interval;

/// 종가 시계열 요청.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRequest {
    /// 종목 티커 (예: AAPL)
    pub ticker: String,
    /// 조회 기간 (예: 6mo, 1y, 2y, max)
    pub period: String,
    /// 시세 간격
    pub interval: Interval,
}

impl PriceRequest {
    /// 새 요청을 생성합니다.
    pub fn new(ticker: impl Into<String>, period: impl Into<String>, interval: Interval) -> Self {
        Self {
            ticker: ticker.into(),
            period: period.into(),
            interval,
        }
    }
}

impl fmt::Display for PriceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} / {})", self.ticker, self.period, self.interval)
    }
}

/// 종가 시계열 제공자.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// 제공자 이름 (로그용).
    fn name(&self) -> &str;

    /// 종가 시계열을 조회합니다.
    ///
    /// 반환되는 시계열은 결측치가 제거되어 있고 시각이 엄격히 증가합니다.
    /// 데이터가 하나도 없으면 에러를 반환합니다.
    async fn fetch_closes(&self, request: &PriceRequest) -> ElliottResult<PriceSeries>;
}
