//! 엘리어트 파동 라벨과 분류 결과 타입.
//!
//! 분류 결과는 두 가지 중 하나입니다:
//! - `Rejected` - 스윙이 부족하거나 추세가 불분명해 라벨링 자체를 하지 않음
//! - `Labeled` - 8개 라벨을 붙였고, 5-3 규칙 충족 여부(`matched`)를 함께 보고

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Price;

/// 파동 태그 (충격파 1-5, 조정파 A-C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveTag {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    A,
    B,
    C,
}

impl WaveTag {
    /// 라벨링 순서대로 나열한 전체 태그.
    pub const SEQUENCE: [WaveTag; 8] = [
        WaveTag::One,
        WaveTag::Two,
        WaveTag::Three,
        WaveTag::Four,
        WaveTag::Five,
        WaveTag::A,
        WaveTag::B,
        WaveTag::C,
    ];

    /// 태그 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveTag::One => "1",
            WaveTag::Two => "2",
            WaveTag::Three => "3",
            WaveTag::Four => "4",
            WaveTag::Five => "5",
            WaveTag::A => "A",
            WaveTag::B => "B",
            WaveTag::C => "C",
        }
    }
}

impl fmt::Display for WaveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 특정 스윙에 붙은 파동 라벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveLabel {
    /// 스윙 시각
    pub timestamp: DateTime<Utc>,
    /// 스윙 가격
    pub price: Price,
    /// 파동 태그
    pub tag: WaveTag,
}

/// 충격파의 추세 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveTrend {
    /// 상승 추세
    Up,
    /// 하락 추세
    Down,
}

impl WaveTrend {
    /// 추세 문자열 ("up" / "down").
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveTrend::Up => "up",
            WaveTrend::Down => "down",
        }
    }
}

impl fmt::Display for WaveTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 라벨링 거부 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// 후보 구간을 만들 만큼 스윙이 없음
    TooFewSwings,
    /// 1파 시작과 5파 끝 가격이 같음
    UnclearTrend,
}

impl RejectReason {
    /// 사유 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::TooFewSwings => "too few swings",
            RejectReason::UnclearTrend => "unclear trend",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 8개 라벨이 붙은 분류 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveLabeling {
    /// 충격파와 조정파 규칙을 모두 충족했는지
    pub matched: bool,
    /// 추세 방향
    pub trend: WaveTrend,
    /// `1,2,3,4,5,A,B,C` 순서의 라벨 8개
    pub labels: Vec<WaveLabel>,
}

/// 5-3 파동 분류 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WaveClassification {
    /// 라벨링 거부
    Rejected {
        /// 거부 사유
        reason: RejectReason,
    },
    /// 라벨링 수행 (패턴 일치 여부는 `matched`로 확인)
    Labeled(WaveLabeling),
}

impl WaveClassification {
    /// 5-3 패턴과 일치하는지 확인합니다.
    pub fn is_match(&self) -> bool {
        matches!(self, WaveClassification::Labeled(labeling) if labeling.matched)
    }

    /// 추세 방향. 거부된 경우 `None`.
    pub fn trend(&self) -> Option<WaveTrend> {
        match self {
            WaveClassification::Labeled(labeling) => Some(labeling.trend),
            WaveClassification::Rejected { .. } => None,
        }
    }

    /// 라벨 목록. 거부된 경우 빈 슬라이스.
    ///
    /// 라벨이 있어도 패턴 일치를 뜻하지는 않습니다. `is_match()`를 먼저 확인하세요.
    pub fn labels(&self) -> &[WaveLabel] {
        match self {
            WaveClassification::Labeled(labeling) => &labeling.labels,
            WaveClassification::Rejected { .. } => &[],
        }
    }

    /// 거부 사유.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            WaveClassification::Rejected { reason } => Some(*reason),
            WaveClassification::Labeled(_) => None,
        }
    }
}
