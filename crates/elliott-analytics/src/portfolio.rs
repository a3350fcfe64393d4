//! 포트폴리오 일괄 분석.
//!
//! 종목마다 시세를 조회하고 분석합니다. 종목 간에는 공유 상태가 없으므로
//! `buffer_unordered`로 동시 실행 수만 제한하고, 결과는 입력 순서로 되돌려 반환합니다.
//! 한 종목의 실패는 에러 행으로 기록되며 전체 실행을 멈추지 않습니다.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info, Instrument};

use elliott_core::{
    analysis_span, AnalysisConfig, ElliottResult, PortfolioEntry, PortfolioResult, Price,
    PriceSource, WaveTrend,
};

use crate::analyzer::ElliottAnalyzer;

/// 포트폴리오 일괄 분석기.
pub struct PortfolioAnalyzer {
    source: Arc<dyn PriceSource>,
    parallelism: usize,
}

impl PortfolioAnalyzer {
    /// 새 분석기를 생성합니다. `parallelism`이 0이면 1로 취급합니다.
    pub fn new(source: Arc<dyn PriceSource>, parallelism: usize) -> Self {
        Self {
            source,
            parallelism: parallelism.max(1),
        }
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// 종목 하나를 분석합니다. 실패는 에러 결과로 변환됩니다.
    pub async fn analyze_entry(&self, entry: &PortfolioEntry) -> PortfolioResult {
        match self.try_analyze(entry).await {
            Ok(result) => {
                info!(
                    matched = result.elliott_5_3_match,
                    swings = result.num_swings,
                    trend = result.trend_label(),
                    "종목 분석 완료"
                );
                result
            }
            Err(e) => {
                error!(
                    error = %e,
                    retryable = e.is_retryable(),
                    source = self.source.name(),
                    "종목 분석 실패"
                );
                PortfolioResult::failure(entry, e.message())
            }
        }
    }

    async fn try_analyze(&self, entry: &PortfolioEntry) -> ElliottResult<PortfolioResult> {
        // 0 이하 임계값은 조회 전에 거부
        AnalysisConfig {
            zigzag_pct: entry.zigzag_pct,
        }
        .validate()?;

        let series = self.source.fetch_closes(&entry.request()).await?;
        let report = ElliottAnalyzer::new(entry.zigzag_pct).analyze(&series);
        Ok(PortfolioResult::success(entry, report))
    }

    /// 전체 포트폴리오를 분석합니다.
    pub async fn run(&self, entries: &[PortfolioEntry]) -> Vec<PortfolioResult> {
        self.run_with_progress(entries, |_, _| {}).await
    }

    /// 전체 포트폴리오를 분석하며 종목이 끝날 때마다 `on_result(입력 인덱스, 결과)`를 호출합니다.
    ///
    /// 콜백은 완료 순서로 호출되지만 반환 값은 입력 순서입니다.
    pub async fn run_with_progress<F>(
        &self,
        entries: &[PortfolioEntry],
        mut on_result: F,
    ) -> Vec<PortfolioResult>
    where
        F: FnMut(usize, &PortfolioResult),
    {
        info!(
            total = entries.len(),
            parallelism = self.parallelism,
            source = self.source.name(),
            "포트폴리오 분석 시작"
        );

        let mut slots: Vec<Option<PortfolioResult>> = vec![None; entries.len()];
        let mut completed = stream::iter(entries.iter().enumerate().map(|(idx, entry)| {
            let span = analysis_span!("portfolio_entry", entry.ticker, entry.interval);
            async move { (idx, self.analyze_entry(entry).await) }.instrument(span)
        }))
        .buffer_unordered(self.parallelism);

        while let Some((idx, result)) = completed.next().await {
            on_result(idx, &result);
            slots[idx] = Some(result);
        }

        let results: Vec<PortfolioResult> = slots.into_iter().flatten().collect();
        let summary = PortfolioSummary::from_results(&results);
        info!(
            successful = summary.successful,
            failed = summary.failed,
            patterns = summary.patterns_found,
            "포트폴리오 분석 완료"
        );
        results
    }
}

/// 패턴이 발견된 종목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedTicker {
    pub ticker: String,
    pub last_price: Price,
    pub trend: Option<WaveTrend>,
}

/// 실패한 종목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedTicker {
    pub ticker: String,
    /// 상태 문자열 (`Error: ...`)
    pub status: String,
}

/// 포트폴리오 분석 요약.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioSummary {
    /// 전체 종목 수
    pub total: usize,
    /// 분석 성공 수
    pub successful: usize,
    /// 분석 실패 수
    pub failed: usize,
    /// 5-3 패턴 발견 수
    pub patterns_found: usize,
    /// 패턴 발견 비율 (%, 성공 건수 대비). 성공이 없으면 `None`
    pub success_rate: Option<Decimal>,
    /// 패턴 발견 종목
    pub matched: Vec<MatchedTicker>,
    /// 실패 종목
    pub failures: Vec<FailedTicker>,
}

impl PortfolioSummary {
    /// 결과 목록에서 요약을 계산합니다.
    pub fn from_results(results: &[PortfolioResult]) -> Self {
        let total = results.len();
        let successful = results.iter().filter(|r| r.status.is_success()).count();
        let matched: Vec<MatchedTicker> = results
            .iter()
            .filter(|r| r.elliott_5_3_match)
            .map(|r| MatchedTicker {
                ticker: r.ticker.clone(),
                last_price: r.last_price,
                trend: r.trend,
            })
            .collect();
        let failures = results
            .iter()
            .filter(|r| !r.status.is_success())
            .map(|r| FailedTicker {
                ticker: r.ticker.clone(),
                status: r.status.to_string(),
            })
            .collect();

        let patterns_found = matched.len();
        let success_rate = (successful > 0).then(|| {
            (Decimal::from(patterns_found) * Decimal::ONE_HUNDRED / Decimal::from(successful))
                .round_dp(1)
        });

        Self {
            total,
            successful,
            failed: total - successful,
            patterns_found,
            success_rate,
            matched,
            failures,
        }
    }
}
