//! 가격 계산을 위한 Decimal 유틸리티.

use rust_decimal::Decimal;

/// 가격 타입.
pub type Price = Decimal;

/// 퍼센트 타입 (5.0 = 5%).
///
/// ZigZag 임계값처럼 사람이 입력하는 값에 사용합니다.
pub type Percentage = Decimal;

/// 퍼센트 값을 비율로 변환합니다 (5.0 → 0.05).
pub fn percent_to_fraction(pct: Percentage) -> Decimal {
    pct / Decimal::ONE_HUNDRED
}

/// 기준 대비 변화율을 계산합니다.
///
/// 기준이 0이면 나눗셈을 하지 않고 0을 반환합니다.
pub fn change_ratio(value: Price, base: Price) -> Decimal {
    if base.is_zero() {
        return Decimal::ZERO;
    }
    (value - base).checked_div(base).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_to_fraction() {
        assert_eq!(percent_to_fraction(dec!(5.0)), dec!(0.05));
        assert_eq!(percent_to_fraction(dec!(12.5)), dec!(0.125));
    }

    #[test]
    fn test_change_ratio() {
        assert_eq!(change_ratio(dec!(110), dec!(100)), dec!(0.1));
        assert_eq!(change_ratio(dec!(90), dec!(100)), dec!(-0.1));
        assert_eq!(change_ratio(dec!(90), Decimal::ZERO), Decimal::ZERO);
    }
}
