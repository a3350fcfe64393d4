//! 엘리어트 파동 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - ZigZag 스윙 검출
//! - 피보나치 되돌림/확장 레벨
//! - 엘리어트 5-3 파동 분류
//! - 시계열 분석 파이프라인과 포트폴리오 일괄 분석
//!
//! 스윙 검출, 피보나치, 분류는 모두 순수 동기 함수이며 호출 간 상태를 공유하지 않습니다.

pub mod analyzer;
pub mod elliott;
pub mod fibonacci;
pub mod portfolio;
pub mod swing;

pub use analyzer::ElliottAnalyzer;
pub use elliott::{classify, MIN_SWINGS, WINDOW_SIZE};
pub use fibonacci::{fibonacci_extensions, fibonacci_levels, FibonacciLevel, FibonacciLevels};
pub use portfolio::{FailedTicker, MatchedTicker, PortfolioAnalyzer, PortfolioSummary};
pub use swing::{detect_swings, SwingDetector};
