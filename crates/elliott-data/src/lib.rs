//! 시세 수집 및 파일 입출력.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Yahoo Finance Chart API 종가 제공자
//! - 로컬 CSV 종가 제공자
//! - 포트폴리오 CSV 읽기/결과 CSV 쓰기
//!
//! 두 제공자 모두 `elliott_core::PriceSource`를 구현합니다.

pub mod csv_source;
pub mod error;
pub mod portfolio_csv;
pub mod yahoo;

pub use csv_source::{parse_timestamp, CsvPriceSource};
pub use error::{DataError, Result};
pub use portfolio_csv::{
    load_portfolio, read_portfolio, result_headers, write_results, write_results_to,
};
pub use yahoo::{parse_chart, YahooPriceSource};
