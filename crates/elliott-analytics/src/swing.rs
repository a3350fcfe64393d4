//! ZigZag 스윙 검출기.
//!
//! 종가 시계열을 한 번 훑으면서 임계값 이상 반전된 지점을 피벗으로 확정합니다.
//!
//! ## 상태 전이
//! - `Seeking`: 첫 피벗 대비 움직임이 임계값에 도달하면 방향을 정함 (피벗은 만들지 않음)
//! - `Up`: 직전 피벗 이후 최고가 대비 낙폭이 `-임계값` 이하가 되면 최고점을 상승 피벗으로 확정하고 `Down`으로 전환
//! - `Down`: 직전 피벗 이후 최저가 대비 반등폭이 `임계값` 이상이 되면 최저점을 하락 피벗으로 확정하고 `Up`으로 전환
//!
//! 한 포인트에서 상승 검사 → 하락 검사 순으로 평가하며, 상승 검사에서 바뀐 상태로
//! 하락 검사를 이어서 수행합니다. 임계값이 0 이하이면 같은 포인트에서 두 검사가 모두
//! 피벗을 만들 수 있습니다.

use rust_decimal::Decimal;
use tracing::debug;

use elliott_core::{
    change_ratio, percent_to_fraction, Percentage, PricePoint, PriceSeries, Swing, SwingDirection,
};

/// 검출기 내부 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// 초기 방향 탐색 중
    Seeking,
    /// 상승 중 (고점 확정 대기)
    Up,
    /// 하락 중 (저점 확정 대기)
    Down,
}

impl ScanState {
    fn direction(self) -> SwingDirection {
        match self {
            ScanState::Seeking => SwingDirection::Unknown,
            ScanState::Up => SwingDirection::Up,
            ScanState::Down => SwingDirection::Down,
        }
    }
}

/// ZigZag 스윙 검출기.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwingDetector {
    threshold_pct: Percentage,
}

impl SwingDetector {
    /// 새 검출기를 생성합니다.
    ///
    /// # 인자
    /// * `threshold_pct` - 반전 임계값 (%, 5.0 = 5%). 0 이하 값도 거부하지 않습니다.
    pub fn new(threshold_pct: Percentage) -> Self {
        Self { threshold_pct }
    }

    /// 반전 임계값 (%).
    pub fn threshold_pct(&self) -> Percentage {
        self.threshold_pct
    }

    /// 스윙을 검출합니다.
    ///
    /// # 반환
    /// 빈 시계열이면 빈 목록. 그 외에는 첫 포인트의 `Unknown` 앵커로 시작해
    /// 마지막 포인트의 종료 스윙으로 끝나는 목록 (같은 시각이 연속되면 첫 스윙만 남김).
    pub fn detect(&self, series: &PriceSeries) -> Vec<Swing> {
        let points = series.points();
        let Some(first) = points.first() else {
            return Vec::new();
        };

        let mut scan = Scan::new(points, percent_to_fraction(self.threshold_pct));
        let mut swings = vec![Swing::at(first, SwingDirection::Unknown)];

        for i in 1..points.len() {
            scan.step(i, &mut swings);
        }

        if let Some(last) = points.last() {
            swings.push(Swing::at(last, scan.state.direction()));
        }

        let swings = dedup_by_timestamp(swings);
        debug!(
            points = points.len(),
            swings = swings.len(),
            threshold_pct = %self.threshold_pct,
            "스윙 검출 완료"
        );
        swings
    }
}

/// 스윙을 검출합니다. `SwingDetector::new(threshold_pct).detect(series)`와 같습니다.
pub fn detect_swings(series: &PriceSeries, threshold_pct: Percentage) -> Vec<Swing> {
    SwingDetector::new(threshold_pct).detect(series)
}

/// 한 번의 검출 패스 상태.
///
/// 직전 피벗 이후 구간 `[pivot, i]`의 최고/최저 인덱스를 증분으로 추적합니다.
/// 동일 가격이면 먼저 나온 인덱스를 유지합니다.
struct Scan<'a> {
    points: &'a [PricePoint],
    threshold: Decimal,
    state: ScanState,
    pivot: usize,
    high: usize,
    low: usize,
}

impl<'a> Scan<'a> {
    fn new(points: &'a [PricePoint], threshold: Decimal) -> Self {
        Self {
            points,
            threshold,
            state: ScanState::Seeking,
            pivot: 0,
            high: 0,
            low: 0,
        }
    }

    fn price(&self, idx: usize) -> Decimal {
        self.points[idx].price
    }

    /// 포인트 `i` 하나에 대한 상태 전이.
    fn step(&mut self, i: usize, swings: &mut Vec<Swing>) {
        let price = self.price(i);
        if price > self.price(self.high) {
            self.high = i;
        }
        if price < self.price(self.low) {
            self.low = i;
        }

        if self.state != ScanState::Down {
            match self.state {
                ScanState::Seeking => self.discover(price),
                _ => {
                    let drawdown = change_ratio(price, self.price(self.high));
                    if drawdown <= -self.threshold {
                        self.confirm(self.high, i, SwingDirection::Up, swings);
                        self.state = ScanState::Down;
                    }
                }
            }
        }

        if self.state != ScanState::Up {
            match self.state {
                ScanState::Seeking => self.discover(price),
                _ => {
                    let low_price = self.price(self.low);
                    let rally = if low_price > Decimal::ZERO {
                        change_ratio(price, low_price)
                    } else {
                        Decimal::ZERO
                    };
                    if rally >= self.threshold {
                        self.confirm(self.low, i, SwingDirection::Down, swings);
                        self.state = ScanState::Up;
                    }
                }
            }
        }
    }

    /// 첫 피벗 대비 움직임으로 초기 방향을 정합니다.
    fn discover(&mut self, price: Decimal) {
        let change = change_ratio(price, self.price(self.pivot));
        if change.abs() >= self.threshold {
            self.state = if change > Decimal::ZERO {
                ScanState::Up
            } else {
                ScanState::Down
            };
        }
    }

    /// `at` 위치를 피벗으로 확정하고 `[at, i]` 구간으로 추적을 다시 시작합니다.
    fn confirm(&mut self, at: usize, i: usize, direction: SwingDirection, swings: &mut Vec<Swing>) {
        let point = &self.points[at];
        debug!(
            timestamp = %point.timestamp,
            price = %point.price,
            direction = %direction,
            "피벗 확정"
        );
        swings.push(Swing::at(point, direction));

        self.pivot = at;
        self.high = at;
        self.low = at;
        for j in at + 1..=i {
            let p = self.price(j);
            if p > self.price(self.high) {
                self.high = j;
            }
            if p < self.price(self.low) {
                self.low = j;
            }
        }
    }
}

/// 연속된 같은 시각의 스윙 중 첫 번째만 남깁니다.
fn dedup_by_timestamp(swings: Vec<Swing>) -> Vec<Swing> {
    let mut cleaned: Vec<Swing> = Vec::with_capacity(swings.len());
    for swing in swings {
        if cleaned
            .last()
            .map_or(true, |last| last.timestamp != swing.timestamp)
        {
            cleaned.push(swing);
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn series(prices: &[Decimal]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(start + Duration::days(i as i64), *p))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    fn prices_of(swings: &[Swing]) -> Vec<Decimal> {
        swings.iter().map(|s| s.price).collect()
    }

    fn directions_of(swings: &[Swing]) -> Vec<SwingDirection> {
        swings.iter().map(|s| s.direction).collect()
    }

    #[test]
    fn test_empty_series() {
        assert!(detect_swings(&PriceSeries::empty(), dec!(5)).is_empty());
    }

    #[test]
    fn test_single_point_collapses_to_anchor() {
        let swings = detect_swings(&series(&[dec!(100)]), dec!(5));
        assert_eq!(swings.len(), 1);
        assert_eq!(swings[0].direction, SwingDirection::Unknown);
        assert_eq!(swings[0].price, dec!(100));
    }

    #[test]
    fn test_flat_series() {
        let swings = detect_swings(&series(&[dec!(50); 10]), dec!(5));
        assert_eq!(swings.len(), 2);
        assert_eq!(
            directions_of(&swings),
            vec![SwingDirection::Unknown, SwingDirection::Unknown]
        );
    }

    #[test]
    fn test_clean_zigzag() {
        // 10% 상승/하락을 다섯 번 반복
        let swings = detect_swings(
            &series(&[
                dec!(100),
                dec!(110),
                dec!(99),
                dec!(108.9),
                dec!(98.01),
                dec!(107.811),
            ]),
            dec!(5),
        );

        assert_eq!(
            prices_of(&swings),
            vec![
                dec!(100),
                dec!(110),
                dec!(99),
                dec!(108.9),
                dec!(98.01),
                dec!(107.811)
            ]
        );
        assert_eq!(
            directions_of(&swings),
            vec![
                SwingDirection::Unknown,
                SwingDirection::Up,
                SwingDirection::Down,
                SwingDirection::Up,
                SwingDirection::Down,
                SwingDirection::Up,
            ]
        );
    }

    #[test]
    fn test_pivot_lands_on_extreme_not_trigger_point() {
        // 고점은 112, 확정은 그 뒤 105에서 발생
        let s = series(&[dec!(100), dec!(106), dec!(112), dec!(110), dec!(105)]);
        let swings = detect_swings(&s, dec!(5));
        assert_eq!(swings[1].price, dec!(112));
        assert_eq!(swings[1].direction, SwingDirection::Up);
        assert_eq!(swings[1].timestamp, s.points()[2].timestamp);
        // 종료 스윙은 아직 확정되지 않은 하락 상태
        assert_eq!(swings.last().unwrap().direction, SwingDirection::Down);
        assert_eq!(swings.last().unwrap().price, dec!(105));
    }

    #[test]
    fn test_equal_highs_keep_first_occurrence() {
        let s = series(&[dec!(100), dec!(110), dec!(110), dec!(100)]);
        let swings = detect_swings(&s, dec!(5));
        assert_eq!(swings[1].timestamp, s.points()[1].timestamp);
    }

    #[test]
    fn test_closer_carries_unconfirmed_state() {
        let s = series(&[dec!(100), dec!(120), dec!(100)]);
        let swings = detect_swings(&s, dec!(5));
        assert_eq!(prices_of(&swings), vec![dec!(100), dec!(120), dec!(100)]);
        assert_eq!(swings[2].direction, SwingDirection::Down);
    }

    #[test]
    fn test_zero_threshold_double_trigger() {
        // 임계값 0: 같은 포인트에서 상승/하락 피벗이 모두 확정되고 dedup으로 정리됨
        let swings = detect_swings(&series(&[dec!(100), dec!(101), dec!(102)]), Decimal::ZERO);
        assert_eq!(prices_of(&swings), vec![dec!(100), dec!(102)]);
        assert_eq!(
            directions_of(&swings),
            vec![SwingDirection::Unknown, SwingDirection::Up]
        );
    }

    #[test]
    fn test_zero_price_pivot_does_not_panic() {
        let swings = detect_swings(
            &series(&[dec!(10), dec!(0), dec!(5), dec!(0), dec!(8)]),
            dec!(5),
        );
        assert_eq!(swings.first().unwrap().price, dec!(10));
        assert_eq!(swings.last().unwrap().price, dec!(8));
    }

    #[test]
    fn test_detector_reports_threshold() {
        assert_eq!(SwingDetector::new(dec!(3.5)).threshold_pct(), dec!(3.5));
    }
}
