//! 스윙(피벗) 타입.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::PricePoint;
use crate::types::Price;

/// 피벗을 만든 가격 움직임의 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingDirection {
    /// 방향 미확정 (첫 앵커 전용)
    #[default]
    Unknown,
    /// 상승으로 만들어진 고점
    Up,
    /// 하락으로 만들어진 저점
    Down,
}

impl fmt::Display for SwingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SwingDirection::Unknown => "unknown",
            SwingDirection::Up => "up",
            SwingDirection::Down => "down",
        };
        write!(f, "{}", s)
    }
}

/// 검출된 스윙 하나.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swing {
    /// 피벗 시각
    pub timestamp: DateTime<Utc>,
    /// 피벗 가격
    pub price: Price,
    /// 피벗을 만든 움직임의 방향
    pub direction: SwingDirection,
}

impl Swing {
    /// 새 스윙을 생성합니다.
    pub fn new(timestamp: DateTime<Utc>, price: Price, direction: SwingDirection) -> Self {
        Self {
            timestamp,
            price,
            direction,
        }
    }

    /// 가격 포인트에서 스윙을 생성합니다.
    pub fn at(point: &PricePoint, direction: SwingDirection) -> Self {
        Self::new(point.timestamp, point.price, direction)
    }
}
