//! Yahoo Finance 시세 제공자.
//!
//! Chart API v8 (`/v8/finance/chart/{ticker}?range=..&interval=..`)에서 종가를 가져옵니다.
//! 조정 종가가 있으면 조정 종가를, 없으면 종가를 사용하며 값이 없는 행은 버립니다.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};

use elliott_core::{ElliottResult, FetchConfig, PricePoint, PriceRequest, PriceSeries, PriceSource};

use crate::error::{DataError, Result};

/// Yahoo Finance API v8 응답 구조
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct YahooAdjClose {
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance 종가 제공자.
#[derive(Debug, Clone)]
pub struct YahooPriceSource {
    client: Client,
    base_url: String,
}

impl YahooPriceSource {
    /// 조회 설정으로 제공자를 생성합니다.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 종목의 Chart API URL.
    pub fn chart_url(&self, ticker: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, ticker)
    }

    /// 종가 시계열을 조회합니다.
    pub async fn fetch(&self, request: &PriceRequest) -> Result<PriceSeries> {
        let url = self.chart_url(&request.ticker);
        debug!(url = %url, period = %request.period, interval = %request.interval, "Fetching from Yahoo Finance");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("range", request.period.as_str()),
                ("interval", request.interval.as_str()),
                ("events", "history"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(DataError::NoData(request.ticker.clone()));
            }
            return Err(DataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!("Yahoo Finance response length: {} bytes", body.len());

        let series = parse_chart(&request.ticker, &body)?;
        info!(
            ticker = %request.ticker,
            points = series.len(),
            "Yahoo Finance 종가 조회 완료"
        );
        Ok(series)
    }
}

#[async_trait]
impl PriceSource for YahooPriceSource {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_closes(&self, request: &PriceRequest) -> ElliottResult<PriceSeries> {
        Ok(self.fetch(request).await?)
    }
}

/// Chart API 응답 본문을 종가 시계열로 변환합니다.
///
/// 값이 없거나 0 이하인 종가는 버립니다. 결과가 비면 `NoData`.
pub fn parse_chart(ticker: &str, body: &str) -> Result<PriceSeries> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)?;

    if let Some(error) = chart_response.chart.error {
        if error.code.eq_ignore_ascii_case("Not Found") {
            return Err(DataError::NoData(ticker.to_string()));
        }
        return Err(DataError::InvalidData(format!(
            "Yahoo Finance error: {} - {}",
            error.code, error.description
        )));
    }

    let Some(result) = chart_response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(DataError::NoData(ticker.to_string()));
    };

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .unwrap_or_default();

    // 조정 종가 배열이 있으면 시계열 전체에 조정 종가만 사용
    let prices = result
        .indicators
        .adj_close
        .and_then(|ac| ac.into_iter().next())
        .and_then(|ac| ac.adj_close)
        .unwrap_or(closes);

    let mut points = Vec::with_capacity(timestamps.len());
    let mut dropped = 0usize;
    for (i, ts) in timestamps.iter().enumerate() {
        let close = prices.get(i).copied().flatten();

        let price = close.and_then(|c| Decimal::from_str(&format!("{:.4}", c)).ok());
        let timestamp = DateTime::from_timestamp(*ts, 0);

        match (timestamp, price) {
            (Some(timestamp), Some(price)) if price > Decimal::ZERO => {
                points.push(PricePoint::new(timestamp, price));
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(ticker, dropped, "결측 종가 제외");
    }

    let series = PriceSeries::from_unsorted(points);
    if series.is_empty() {
        return Err(DataError::NoData(ticker.to_string()));
    }
    Ok(series)
}
