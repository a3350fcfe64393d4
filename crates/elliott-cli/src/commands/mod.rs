//! CLI 명령어 모듈.

pub mod analyze;
pub mod portfolio;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use elliott_core::{FetchConfig, PriceSource};
use elliott_data::{CsvPriceSource, YahooPriceSource};

/// 시세 제공자를 선택합니다. CSV 경로가 있으면 로컬 파일, 없으면 Yahoo Finance.
pub fn price_source(csv: Option<&Path>, fetch: &FetchConfig) -> Result<Arc<dyn PriceSource>> {
    match csv {
        Some(path) => Ok(Arc::new(CsvPriceSource::new(path))),
        None => {
            let source =
                YahooPriceSource::new(fetch).context("Yahoo Finance 클라이언트 생성 실패")?;
            Ok(Arc::new(source))
        }
    }
}

/// 가격을 소수점 둘째 자리까지 표시합니다.
pub fn fmt_price(price: Decimal) -> String {
    format!("{:.2}", price.round_dp(2))
}
