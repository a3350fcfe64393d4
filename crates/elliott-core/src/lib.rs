//! # Elliott Core
//!
//! 엘리어트 파동 분석기의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 분석 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 가격 시계열 (`PricePoint`, `PriceSeries`)
//! - 스윙(피벗) 및 방향
//! - 파동 라벨, 분류 결과, 분석 리포트
//! - 시세 간격(Interval) 정의
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
