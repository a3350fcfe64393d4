//! 설정 관리.
//!
//! 기본값 → 설정 파일(선택) → 환경 변수 순으로 값을 덮어씁니다.
//! 환경 변수는 `ELLIOTT__<섹션>__<키>` 형식입니다 (예: `ELLIOTT__ANALYSIS__ZIGZAG_PCT=3`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ElliottError, ElliottResult};
use crate::types::{Interval, Percentage};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 파동 분석 설정
    pub analysis: AnalysisConfig,
    /// 시세 조회 설정
    pub fetch: FetchConfig,
    /// 포트폴리오 일괄 분석 설정
    pub portfolio: PortfolioConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 파동 분석 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// ZigZag 반전 임계값 (%, 5.0 = 5%)
    pub zigzag_pct: Percentage,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            zigzag_pct: Decimal::new(50, 1),
        }
    }
}

impl AnalysisConfig {
    /// 임계값이 양수인지 검증합니다.
    ///
    /// 스윙 검출기 자체는 0 이하 값을 막지 않으므로 설정 경계에서 거릅니다.
    pub fn validate(&self) -> ElliottResult<()> {
        if self.zigzag_pct <= Decimal::ZERO {
            return Err(ElliottError::Config(format!(
                "analysis.zigzag_pct must be positive, got {}",
                self.zigzag_pct
            )));
        }
        Ok(())
    }
}

/// 시세 조회 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// 조회 기간 (예: 6mo, 1y, 2y, 5y, max)
    pub period: String,
    /// 시세 간격
    pub interval: Interval,
    /// Yahoo Finance API 기본 URL
    pub base_url: String,
    /// HTTP User-Agent
    pub user_agent: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            period: "2y".to_string(),
            interval: Interval::D1,
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            timeout_secs: 30,
        }
    }
}

/// 포트폴리오 일괄 분석 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// 동시에 분석할 최대 종목 수
    pub parallelism: usize,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self { parallelism: 4 }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// 종목별 분석 span의 시작/종료 기록 여부
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// `path`가 `None`이거나 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> ElliottResult<Self> {
        let mut builder = config::Config::builder()
            .set_default("analysis.zigzag_pct", "5.0")?
            .set_default("fetch.period", "2y")?
            .set_default("fetch.interval", "1d")?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(false));
        }

        let builder = builder.add_source(
            config::Environment::with_prefix("ELLIOTT")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> ElliottResult<Self> {
        Self::load(Some(DEFAULT_CONFIG_PATH))
    }

    /// 전체 설정을 검증합니다.
    pub fn validate(&self) -> ElliottResult<()> {
        self.analysis.validate()?;
        if self.portfolio.parallelism == 0 {
            return Err(ElliottError::Config(
                "portfolio.parallelism must be at least 1".to_string(),
            ));
        }
        if self.fetch.period.trim().is_empty() {
            return Err(ElliottError::Config("fetch.period is empty".to_string()));
        }
        Ok(())
    }
}
