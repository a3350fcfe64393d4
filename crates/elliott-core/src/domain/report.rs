//! 분석 리포트.

use serde::{Deserialize, Serialize};

use super::{RejectReason, Swing, WaveClassification, WaveLabel, WaveTrend};
use crate::types::{Percentage, Price};

/// 시계열 한 건에 대한 분석 결과.
///
/// 분석 호출마다 한 번 만들어지며 이후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// 사용한 ZigZag 임계값 (%)
    pub zigzag_pct: Percentage,
    /// 마지막 가격. 빈 시계열이면 `None`
    pub last_price: Option<Price>,
    /// 검출된 스윙 개수
    pub num_swings: usize,
    /// 5-3 패턴 일치 여부
    pub elliott_5_3_match: bool,
    /// 추세 방향
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<WaveTrend>,
    /// 라벨링 거부 사유
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    /// 파동 라벨 (일치하지 않아도 라벨링을 시도했다면 채워짐)
    pub labels: Vec<WaveLabel>,
    /// 검출된 스윙 전체
    pub swings: Vec<Swing>,
}

impl AnalysisReport {
    /// 스윙과 분류 결과로 리포트를 생성합니다.
    pub fn new(
        zigzag_pct: Percentage,
        last_price: Option<Price>,
        swings: Vec<Swing>,
        classification: &WaveClassification,
    ) -> Self {
        Self {
            zigzag_pct,
            last_price,
            num_swings: swings.len(),
            elliott_5_3_match: classification.is_match(),
            trend: classification.trend(),
            reason: classification.reject_reason(),
            labels: classification.labels().to_vec(),
            swings,
        }
    }

    /// 라벨이 있는지 확인합니다.
    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }
}
