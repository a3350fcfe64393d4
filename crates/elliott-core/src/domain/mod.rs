//! 파동 분석을 위한 도메인 모델.

mod market_data;
mod portfolio;
mod price_source;
mod report;
mod swing;
mod wave;

pub use market_data::*;
pub use portfolio::*;
pub use price_source::*;
pub use report::*;
pub use swing::*;
pub use wave::*;
