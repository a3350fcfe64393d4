//! tracing 기반 로깅 초기화.
//!
//! 리포트는 stdout으로 나가므로 로그는 항상 stderr에 씁니다.
//! 레벨은 `RUST_LOG`가 있으면 그것을, 없으면 설정 파일의 `logging.level`을 따릅니다.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 터미널용
    #[default]
    Pretty,
    /// 포트폴리오 배치 로그 수집용
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 필터 지시자 (예: "info", "elliott_analytics=debug")
    pub level: String,
    pub format: LogFormat,
    /// `analysis_span!` 진입/종료 이벤트 기록
    pub span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            span_events: false,
        }
    }
}

impl LogConfig {
    /// 로그 형식을 바꿉니다 (`--log-format`).
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn fmt_span(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    /// `[logging]` 섹션을 변환합니다. 알 수 없는 형식은 pretty.
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            format: config.format.parse().unwrap_or_default(),
            span_events: config.span_events,
        }
    }
}

/// 전역 subscriber를 설치합니다.
///
/// ```no_run
/// use elliott_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::default().with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(config.fmt_span());
    let fmt_layer = match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

/// 종목 분석 컨텍스트 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! analysis_span {
    ($name:expr, $ticker:expr) => {
        tracing::info_span!($name, ticker = %$ticker)
    };
    ($name:expr, $ticker:expr, $interval:expr) => {
        tracing::info_span!($name, ticker = %$ticker, interval = %$interval)
    };
}
