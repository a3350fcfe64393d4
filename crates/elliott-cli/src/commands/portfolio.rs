//! 포트폴리오 일괄 분석 명령어.
//!
//! # 사용 예시
//!
//! ```bash
//! # portfolio.csv의 모든 종목 분석 후 결과 저장
//! elliott portfolio --portfolio portfolio.csv --output results.csv
//!
//! # 요약만 출력, 동시 8종목
//! elliott portfolio --summary-only --parallelism 8
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use elliott_analytics::{PortfolioAnalyzer, PortfolioSummary};
use elliott_core::{AppConfig, PortfolioResult};
use elliott_data::{load_portfolio, write_results};

use super::{fmt_price, price_source};

/// 포트폴리오 명령 설정.
#[derive(Debug, Clone)]
pub struct PortfolioCliConfig {
    /// 포트폴리오 CSV 경로
    pub portfolio: PathBuf,
    /// 결과 CSV 저장 경로
    pub output: Option<PathBuf>,
    /// 요약만 출력
    pub summary_only: bool,
    /// 동시 분석 종목 수 (없으면 설정값)
    pub parallelism: Option<usize>,
    /// 로컬 CSV 시세 디렉터리
    pub csv: Option<PathBuf>,
}

/// 포트폴리오 분석을 실행합니다.
pub async fn run_portfolio(config: PortfolioCliConfig, app: &AppConfig) -> Result<()> {
    let entries = load_portfolio(&config.portfolio).with_context(|| {
        format!("포트폴리오 파일 읽기 실패: {}", config.portfolio.display())
    })?;

    let source = price_source(config.csv.as_deref(), &app.fetch)?;
    let analyzer = PortfolioAnalyzer::new(
        source,
        config.parallelism.unwrap_or(app.portfolio.parallelism),
    );

    let total = entries.len();
    println!(
        "{}개 종목 분석 시작 (동시 {}개)...",
        total,
        analyzer.parallelism()
    );

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let mut done = 0usize;
    let results = analyzer
        .run_with_progress(&entries, |_, result| {
            done += 1;
            pb.inc(1);
            pb.set_message(result.ticker.clone());
            if !config.summary_only {
                pb.println(progress_line(done, total, result));
            }
        })
        .await;
    pb.finish_and_clear();

    if let Some(output) = &config.output {
        write_results(output, &results)
            .with_context(|| format!("결과 저장 실패: {}", output.display()))?;
        println!("결과 저장: {}", output.display());
    }

    let summary = PortfolioSummary::from_results(&results);
    write_summary(&mut io::stdout().lock(), &summary)?;
    Ok(())
}

/// 종목 하나의 진행 상황 출력.
pub fn progress_line(done: usize, total: usize, result: &PortfolioResult) -> String {
    if !result.status.is_success() {
        return format!("[{}/{}] {}: ✗ {}", done, total, result.ticker, result.status);
    }

    let found = if result.elliott_5_3_match {
        "✓ 발견"
    } else {
        "✗ 없음"
    };
    let trend = result
        .trend
        .map(|t| format!(" ({} 추세)", t))
        .unwrap_or_default();
    format!(
        "[{}/{}] {}: 5-3 패턴 {}{} | 마지막 가격 ${}, 스윙 {}개",
        done,
        total,
        result.ticker,
        found,
        trend,
        fmt_price(result.last_price),
        result.num_swings
    )
}

/// 요약을 씁니다.
pub fn write_summary<W: Write>(out: &mut W, summary: &PortfolioSummary) -> io::Result<()> {
    writeln!(out, "\n═══════════════════════════════════════════════════════════════")?;
    writeln!(out, "포트폴리오 분석 요약")?;
    writeln!(out, "═══════════════════════════════════════════════════════════════")?;
    writeln!(out, "  전체 종목:      {}", summary.total)?;
    writeln!(out, "  분석 성공:      {}", summary.successful)?;
    writeln!(out, "  분석 실패:      {}", summary.failed)?;
    writeln!(out, "  5-3 패턴 발견:  {}", summary.patterns_found)?;
    let rate = summary
        .success_rate
        .map(|r| format!("{:.1}%", r))
        .unwrap_or_else(|| "N/A".to_string());
    writeln!(out, "  발견 비율:      {}", rate)?;

    if !summary.matched.is_empty() {
        writeln!(out, "\n5-3 패턴 발견 종목:")?;
        for stock in &summary.matched {
            let trend = stock
                .trend
                .map(|t| format!(" ({} 추세)", t))
                .unwrap_or_default();
            writeln!(
                out,
                "  • {}: ${}{}",
                stock.ticker,
                fmt_price(stock.last_price),
                trend
            )?;
        }
    }

    if !summary.failures.is_empty() {
        writeln!(out, "\n분석 실패 종목:")?;
        for stock in &summary.failures {
            writeln!(out, "  • {}: {}", stock.ticker, stock.status)?;
        }
    }
    Ok(())
}
