//! 엘리어트 파동 분석 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 단일 종목 분석 (Yahoo Finance 2년 일봉, ZigZag 5%)
//! elliott analyze --ticker AAPL
//!
//! # 주봉, 임계값 8%, 피보나치 레벨 포함
//! elliott analyze --ticker GOOGL --period 5y --interval 1wk --zigzag 8 --fib
//!
//! # 포트폴리오 일괄 분석
//! elliott portfolio --portfolio portfolio.csv --output results.csv
//!
//! # 설정 파일과 JSON 로그
//! elliott --config config/prod.toml --log-format json portfolio
//! ```

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, error};

use elliott_core::{init_logging, AppConfig, Interval, LogConfig, LogFormat};

mod commands;

use commands::analyze::{run_analyze, AnalyzeConfig, OutputFormat};
use commands::portfolio::{run_portfolio, PortfolioCliConfig};

#[derive(Parser)]
#[command(name = "elliott")]
#[command(about = "Elliott 5-3 wave analyzer - ZigZag 스윙 기반 파동 라벨링", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: config/default.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 단일 종목 5-3 파동 분석
    Analyze {
        /// 종목 티커 (예: AAPL, GOOGL)
        #[arg(short, long)]
        ticker: String,

        /// 조회 기간 (예: 6mo, 1y, 2y, max)
        #[arg(short, long)]
        period: Option<String>,

        /// 시세 간격 (1d, 1wk, 1mo 등)
        #[arg(short, long)]
        interval: Option<Interval>,

        /// ZigZag 임계값 (%)
        #[arg(short, long)]
        zigzag: Option<Decimal>,

        /// 로컬 CSV 시세 파일 또는 디렉터리
        #[arg(long)]
        csv: Option<PathBuf>,

        /// 피보나치 되돌림/확장 레벨 출력
        #[arg(long, default_value = "false")]
        fib: bool,

        /// 출력 형식
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// 포트폴리오 CSV 일괄 분석
    Portfolio {
        /// 포트폴리오 CSV 경로 (ticker,period,interval,zigzag)
        #[arg(short, long, default_value = "portfolio.csv")]
        portfolio: PathBuf,

        /// 결과 CSV 저장 경로
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 종목별 출력 없이 요약만 표시
        #[arg(long, default_value = "false")]
        summary_only: bool,

        /// 동시 분석 종목 수
        #[arg(long)]
        parallelism: Option<usize>,

        /// 로컬 CSV 시세 디렉터리 (TICKER.csv)
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let app = match &cli.config {
        Some(path) => AppConfig::load(Some(path))?,
        None => AppConfig::load_default()?,
    };

    let mut log_config = LogConfig::from(&app.logging);
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format);
    }
    init_logging(log_config).map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;
    debug!(?app, "설정 로드 완료");

    let result = match cli.command {
        Commands::Analyze {
            ticker,
            period,
            interval,
            zigzag,
            csv,
            fib,
            format,
        } => {
            let config = AnalyzeConfig {
                ticker,
                period,
                interval,
                zigzag_pct: zigzag,
                csv,
                fib,
                format,
            };
            run_analyze(config, &app).await
        }
        Commands::Portfolio {
            portfolio,
            output,
            summary_only,
            parallelism,
            csv,
        } => {
            let config = PortfolioCliConfig {
                portfolio,
                output,
                summary_only,
                parallelism,
                csv,
            };
            run_portfolio(config, &app).await
        }
    };

    if let Err(e) = &result {
        error!("명령 실행 실패: {:#}", e);
    }
    result
}
