//! 단일 종목 분석 명령어.
//!
//! # 사용 예시
//!
//! ```bash
//! # Yahoo Finance 2년 일봉, ZigZag 5%
//! elliott analyze --ticker AAPL
//!
//! # 주봉, 임계값 8%, 피보나치 레벨 포함
//! elliott analyze --ticker GOOGL --interval 1wk --zigzag 8 --fib
//!
//! # 로컬 CSV로 분석, JSON 출력
//! elliott analyze --ticker UNH --csv data/UNH.csv --format json
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, Instrument};

use elliott_analytics::{fibonacci_extensions, fibonacci_levels, ElliottAnalyzer, FibonacciLevels};
use elliott_core::{
    analysis_span, AnalysisConfig, AnalysisReport, AppConfig, Interval, Percentage, Price,
    PriceRequest, WaveTag,
};

use super::{fmt_price, price_source};

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// 사람이 읽는 텍스트
    #[default]
    Text,
    /// JSON
    Json,
}

/// 분석 명령 설정.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// 종목 티커
    pub ticker: String,
    /// 조회 기간 (없으면 설정값)
    pub period: Option<String>,
    /// 시세 간격 (없으면 설정값)
    pub interval: Option<Interval>,
    /// ZigZag 임계값 (없으면 설정값)
    pub zigzag_pct: Option<Percentage>,
    /// 로컬 CSV 경로
    pub csv: Option<PathBuf>,
    /// 피보나치 레벨 출력 여부
    pub fib: bool,
    /// 출력 형식
    pub format: OutputFormat,
}

/// 피보나치 출력 블록.
#[derive(Debug, Serialize)]
pub struct FibonacciOutput {
    pub retracement: FibonacciLevels,
    pub extension: FibonacciLevels,
}

/// JSON 출력 구조.
#[derive(Debug, Serialize)]
struct AnalyzeOutput<'a> {
    ticker: &'a str,
    period: &'a str,
    interval: Interval,
    #[serde(flatten)]
    report: &'a AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    fibonacci: Option<FibonacciOutput>,
}

/// 분석을 실행하고 결과를 출력합니다.
pub async fn run_analyze(config: AnalyzeConfig, app: &AppConfig) -> Result<()> {
    let analysis = AnalysisConfig {
        zigzag_pct: config.zigzag_pct.unwrap_or(app.analysis.zigzag_pct),
    };
    analysis.validate()?;

    let request = PriceRequest::new(
        config.ticker.trim().to_uppercase(),
        config.period.clone().unwrap_or_else(|| app.fetch.period.clone()),
        config.interval.unwrap_or(app.fetch.interval),
    );

    let span = analysis_span!("analyze", request.ticker, request.interval);
    let report = async {
        let source = price_source(config.csv.as_deref(), &app.fetch)?;

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("{} 시세 조회 중 ({})...", request.ticker, source.name()));

        let fetched = source.fetch_closes(&request).await;
        pb.finish_and_clear();
        let series = fetched.with_context(|| format!("{} 시세 조회 실패", request.ticker))?;

        let report = ElliottAnalyzer::new(analysis.zigzag_pct).analyze(&series);
        info!(
            points = series.len(),
            swings = report.num_swings,
            matched = report.elliott_5_3_match,
            "분석 완료"
        );
        Ok::<_, anyhow::Error>(report)
    }
    .instrument(span)
    .await?;

    let fibonacci = if config.fib {
        fibonacci_anchor(&report).map(|(a, b)| FibonacciOutput {
            retracement: fibonacci_levels(a, b),
            extension: fibonacci_extensions(a, b),
        })
    } else {
        None
    };

    match config.format {
        OutputFormat::Text => {
            write_text(&mut io::stdout().lock(), &request, &report, fibonacci.as_ref())?
        }
        OutputFormat::Json => {
            let output = AnalyzeOutput {
                ticker: &request.ticker,
                period: &request.period,
                interval: request.interval,
                report: &report,
                fibonacci,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// 피보나치 계산에 사용할 두 가격을 고릅니다.
///
/// 라벨이 있으면 1파 시작과 5파 끝, 없으면 마지막 두 스윙.
pub fn fibonacci_anchor(report: &AnalysisReport) -> Option<(Price, Price)> {
    let label_price = |tag: WaveTag| {
        report
            .labels
            .iter()
            .find(|l| l.tag == tag)
            .map(|l| l.price)
    };

    if let (Some(start), Some(end)) = (label_price(WaveTag::One), label_price(WaveTag::Five)) {
        return Some((start, end));
    }

    match report.swings.as_slice() {
        [.., a, b] => Some((a.price, b.price)),
        _ => None,
    }
}

/// 텍스트 리포트를 씁니다.
///
/// 분 단위 간격이면 라벨 시각까지 표시합니다.
pub fn write_text<W: Write>(
    out: &mut W,
    request: &PriceRequest,
    report: &AnalysisReport,
    fibonacci: Option<&FibonacciOutput>,
) -> io::Result<()> {
    let trend = report.trend.map(|t| t.as_str()).unwrap_or("N/A");
    let last_price = report
        .last_price
        .map(fmt_price)
        .unwrap_or_else(|| "N/A".to_string());
    let date_format = if request.interval.is_intraday() {
        "%Y-%m-%d %H:%M"
    } else {
        "%Y-%m-%d"
    };

    writeln!(out, "\n📊 엘리어트 파동 분석 결과")?;
    writeln!(out, "═══════════════════════════════════════════════════════════════")?;
    writeln!(out, "  종목:        {}", request.ticker)?;
    writeln!(out, "  마지막 가격: {}", last_price)?;
    writeln!(
        out,
        "  기간: {}  간격: {}  ZigZag: {}%",
        request.period,
        request.interval,
        report.zigzag_pct.normalize()
    )?;
    writeln!(out, "  스윙 수:     {}", report.num_swings)?;
    writeln!(
        out,
        "  5-3 패턴:    {}  추세: {}",
        if report.elliott_5_3_match { "발견" } else { "없음" },
        trend
    )?;
    if let Some(reason) = report.reason {
        writeln!(out, "  사유:        {}", reason)?;
    }

    if report.has_labels() {
        writeln!(out, "\n  파동 라벨:")?;
        for label in &report.labels {
            writeln!(
                out,
                "    {}: {}  {}",
                label.tag,
                label.timestamp.format(date_format),
                fmt_price(label.price)
            )?;
        }
    }

    if let Some(fib) = fibonacci {
        writeln!(
            out,
            "\n  피보나치 되돌림 ({} → {}):",
            fmt_price(fib.retracement.start),
            fmt_price(fib.retracement.end)
        )?;
        for level in &fib.retracement {
            writeln!(out, "    {:>6}: {}", level.label, fmt_price(level.price))?;
        }
        writeln!(out, "\n  피보나치 확장:")?;
        for level in &fib.extension {
            writeln!(out, "    {:>6}: {}", level.label, fmt_price(level.price))?;
        }
    }

    writeln!(out, "═══════════════════════════════════════════════════════════════")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use elliott_core::{PricePoint, PriceSeries};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn series(prices: &[Decimal]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint::new(start + ChronoDuration::days(i as i64), *p))
                .collect(),
        )
        .unwrap()
    }

    fn render(
        request: &PriceRequest,
        report: &AnalysisReport,
        fib: Option<&FibonacciOutput>,
    ) -> String {
        let mut out = Vec::new();
        write_text(&mut out, request, report, fib).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn matched_report() -> AnalysisReport {
        ElliottAnalyzer::new(dec!(3)).analyze(&series(&[
            dec!(100),
            dec!(110),
            dec!(105),
            dec!(115),
            dec!(108),
            dec!(120),
            dec!(114),
            dec!(118),
            dec!(112),
        ]))
    }

    #[test]
    fn test_fibonacci_anchor_uses_wave_labels() {
        let report = matched_report();
        assert_eq!(fibonacci_anchor(&report), Some((dec!(100), dec!(108))));
    }

    #[test]
    fn test_fibonacci_anchor_falls_back_to_last_swings() {
        let report = ElliottAnalyzer::new(dec!(5)).analyze(&series(&[dec!(100), dec!(120), dec!(100)]));
        assert!(!report.has_labels());
        assert_eq!(fibonacci_anchor(&report), Some((dec!(120), dec!(100))));

        let single = ElliottAnalyzer::new(dec!(5)).analyze(&series(&[dec!(100)]));
        assert_eq!(fibonacci_anchor(&single), None);
    }

    #[test]
    fn test_write_text_lists_labels_and_levels() {
        let report = matched_report();
        let request = PriceRequest::new("TEST", "2y", Interval::D1);
        let (a, b) = fibonacci_anchor(&report).unwrap();
        let fib = FibonacciOutput {
            retracement: fibonacci_levels(a, b),
            extension: fibonacci_extensions(a, b),
        };

        let text = render(&request, &report, Some(&fib));
        assert!(text.contains("종목:        TEST"));
        assert!(text.contains("마지막 가격: 112.00"));
        assert!(text.contains("ZigZag: 3%"));
        assert!(text.contains("5-3 패턴:    발견  추세: up"));
        assert!(text.contains("1: 2024-01-02  100.00"));
        assert!(text.contains("C: 2024-01-09  118.00"));
        assert!(text.contains("0.5: 104.00"));
        assert!(text.contains("2.0: 116.00"));
    }

    #[test]
    fn test_write_text_rejected() {
        let report = ElliottAnalyzer::new(dec!(5)).analyze(&series(&[dec!(10); 4]));
        let request = PriceRequest::new("FLAT", "1y", Interval::W1);
        let text = render(&request, &report, None);
        assert!(text.contains("추세: N/A"));
        assert!(text.contains("사유:        too few swings"));
        assert!(!text.contains("파동 라벨"));
    }

    #[test]
    fn test_intraday_labels_show_time() {
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 13, 30, 0).unwrap();
        let prices = [100, 110, 105, 115, 108, 120, 114, 118, 112];
        let series = PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let at = start + ChronoDuration::minutes(15 * i as i64);
                    PricePoint::new(at, Decimal::from(*p))
                })
                .collect(),
        )
        .unwrap();
        let report = ElliottAnalyzer::new(dec!(3)).analyze(&series);
        let request = PriceRequest::new("SPY", "5d", Interval::M15);

        let text = render(&request, &report, None);
        assert!(text.contains("1: 2024-06-03 13:30  100.00"));
        assert!(text.contains("C: 2024-06-03 15:15  118.00"));
    }

    #[test]
    fn test_json_output_flattens_report() {
        let report = matched_report();
        let output = AnalyzeOutput {
            ticker: "TEST",
            period: "2y",
            interval: Interval::D1,
            report: &report,
            fibonacci: None,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["ticker"], "TEST");
        assert_eq!(json["interval"], "1d");
        assert_eq!(json["elliott_5_3_match"], true);
        assert!(json.get("fibonacci").is_none());
    }
}
