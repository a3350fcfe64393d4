//! 가격 시계열 타입.
//!
//! - `PricePoint` - (시각, 가격) 한 쌍
//! - `PriceSeries` - 시간순으로 엄격히 정렬된 `PricePoint` 목록

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ElliottError, ElliottResult};
use crate::types::Price;

/// 가격 데이터 포인트.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 시각
    pub timestamp: DateTime<Utc>,
    /// 가격 (보통 종가)
    pub price: Price,
}

impl PricePoint {
    /// 새 가격 포인트를 생성합니다.
    pub fn new(timestamp: DateTime<Utc>, price: Price) -> Self {
        Self { timestamp, price }
    }
}

/// 가격 시계열.
///
/// 시각이 엄격히 증가하는 순서로만 구성됩니다. 결측치 제거는 상위 계층의 몫입니다.
/// 비어 있는 시계열도 허용됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// 포인트 목록에서 시계열을 생성합니다.
    ///
    /// # 에러
    ///
    /// 시각이 엄격히 증가하지 않으면 `InvalidInput`을 반환합니다.
    pub fn new(points: Vec<PricePoint>) -> ElliottResult<Self> {
        if let Some(pos) = points
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(ElliottError::InvalidInput(format!(
                "price series is not strictly time-ordered at index {} ({} -> {})",
                pos + 1,
                points[pos].timestamp,
                points[pos + 1].timestamp
            )));
        }
        Ok(Self { points })
    }

    /// 정렬되지 않았거나 중복된 포인트를 정리해 시계열을 생성합니다.
    ///
    /// 시각순으로 정렬한 뒤 같은 시각은 마지막 값을 남깁니다.
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.timestamp == point.timestamp => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    /// 빈 시계열을 생성합니다.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 포인트 슬라이스를 반환합니다.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// 포인트 개수.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 첫 포인트.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// 마지막 포인트.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// 마지막 가격.
    pub fn last_price(&self) -> Option<Price> {
        self.points.last().map(|p| p.price)
    }

    /// 포인트 반복자.
    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
