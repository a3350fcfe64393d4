//! 시계열 한 건에 대한 분석 파이프라인 (스윙 검출 → 5-3 분류 → 리포트).

use tracing::debug;

use elliott_core::{AnalysisReport, Percentage, PriceSeries};

use crate::elliott::classify;
use crate::swing::SwingDetector;

/// 엘리어트 5-3 분석기.
#[derive(Debug, Clone, Copy)]
pub struct ElliottAnalyzer {
    detector: SwingDetector,
}

impl ElliottAnalyzer {
    /// 주어진 ZigZag 임계값(%)으로 분석기를 생성합니다.
    pub fn new(zigzag_pct: Percentage) -> Self {
        Self {
            detector: SwingDetector::new(zigzag_pct),
        }
    }

    pub fn zigzag_pct(&self) -> Percentage {
        self.detector.threshold_pct()
    }

    /// 시계열을 분석합니다.
    ///
    /// 빈 시계열은 에러가 아니며 스윙 0개, "too few swings" 거부 결과가 됩니다.
    pub fn analyze(&self, series: &PriceSeries) -> AnalysisReport {
        let swings = self.detector.detect(series);
        let classification = classify(&swings);

        debug!(
            swings = swings.len(),
            matched = classification.is_match(),
            "시계열 분석 완료"
        );

        AnalysisReport::new(
            self.zigzag_pct(),
            series.last_price(),
            swings,
            &classification,
        )
    }
}
